use spellcast::{
    Command, Invoker, Property, Replace, Size, Spell, Target, TargetId, Targets, Value, Visibility,
};
use std::sync::{Arc, Mutex};
use std::thread;

fn goblin() -> (Targets, TargetId) {
    let mut targets = Targets::new();
    let id = targets.insert(Target::goblin());
    (targets, id)
}

fn size(targets: &Targets, id: TargetId) -> Size {
    targets.get(id).unwrap().size()
}

fn visibility(targets: &Targets, id: TargetId) -> Visibility {
    targets.get(id).unwrap().visibility()
}

#[test]
fn replace_round_trip() {
    for start in [Size::Small, Size::Normal, Size::Large] {
        for value in [Size::Small, Size::Normal, Size::Large] {
            let (mut targets, id) = goblin();
            targets.get_mut(id).unwrap().set(start);
            let mut invoker = Invoker::new();
            invoker.apply(&mut targets, id, Replace::new("resize", value));
            assert_eq!(size(&targets, id), value);
            assert!(invoker.undo_last(&mut targets));
            assert_eq!(size(&targets, id), start);
            assert!(invoker.redo_last(&mut targets));
            assert_eq!(size(&targets, id), value);
        }
    }
}

#[test]
fn toggle_round_trip() {
    let (mut targets, id) = goblin();
    let mut invoker = Invoker::new();
    invoker.apply(&mut targets, id, Spell::invisibility());
    let after_apply = targets.get(id).unwrap().describe();
    invoker.undo_last(&mut targets);
    assert_eq!(visibility(&targets, id), Visibility::Visible);
    invoker.redo_last(&mut targets);
    assert_eq!(targets.get(id).unwrap().describe(), after_apply);
}

#[test]
fn lifo() {
    let (mut targets, id) = goblin();
    let mut invoker = Invoker::new();
    invoker.apply(&mut targets, id, Spell::shrink());
    invoker.apply(&mut targets, id, Spell::invisibility());
    invoker.apply(&mut targets, id, Spell::enlarge());

    let mut undone = Vec::new();
    while let Some(text) = invoker.undo_text() {
        invoker.undo_last(&mut targets);
        undone.push(text);
    }
    assert_eq!(undone, ["Enlarge spell", "Invisibility spell", "Shrink spell"]);
    assert_eq!(targets.get(id), Some(&Target::goblin()));
}

#[test]
fn empty_stacks_are_noops() {
    let (mut targets, id) = goblin();
    let mut invoker = Invoker::<Spell>::new();
    assert!(!invoker.undo_last(&mut targets));
    assert!(!invoker.redo_last(&mut targets));
    assert!(invoker.is_empty());
    assert_eq!(targets.get(id), Some(&Target::goblin()));

    invoker.apply(&mut targets, id, Spell::shrink());
    let before = targets.get(id).unwrap().clone();
    assert!(!invoker.redo_last(&mut targets));
    assert_eq!(targets.get(id), Some(&before));
    assert_eq!((invoker.undo_len(), invoker.redo_len()), (1, 0));
}

#[test]
fn double_undo_is_net_noop() {
    let (mut targets, id) = goblin();
    let mut shrink = Spell::shrink();
    shrink.execute(&mut targets, id);
    shrink.undo(&mut targets);
    shrink.undo(&mut targets);
    assert_eq!(size(&targets, id), Size::Small);
}

#[test]
fn goblin_scenario() {
    let (mut targets, id) = goblin();
    let mut wizard = Invoker::builder().actor("Wizard").build();
    assert_eq!(
        targets.get(id).unwrap().describe().to_string(),
        "Goblin, [size=normal] [visibility=visible]"
    );

    wizard.apply(&mut targets, id, Spell::shrink());
    assert_eq!(size(&targets, id), Size::Small);

    wizard.apply(&mut targets, id, Spell::invisibility());
    assert_eq!(visibility(&targets, id), Visibility::Invisible);
    assert_eq!(size(&targets, id), Size::Small);
    let after_applies = targets.get(id).unwrap().describe();

    wizard.undo_last(&mut targets);
    assert_eq!(visibility(&targets, id), Visibility::Visible);
    assert_eq!(size(&targets, id), Size::Small);

    wizard.undo_last(&mut targets);
    assert_eq!(size(&targets, id), Size::Normal);

    wizard.redo_last(&mut targets);
    assert_eq!(size(&targets, id), Size::Small);
    assert_eq!(visibility(&targets, id), Visibility::Visible);

    wizard.redo_last(&mut targets);
    assert_eq!(visibility(&targets, id), Visibility::Invisible);
    assert_eq!(targets.get(id).unwrap().describe(), after_applies);
    assert_eq!(
        after_applies.get(Property::Size),
        Some(Value::Size(Size::Small))
    );
}

#[test]
fn commands_bind_to_their_own_target() {
    let mut targets = Targets::new();
    let goblin = targets.insert(Target::goblin());
    let troll = targets.insert(Target::new("Troll"));
    let mut invoker = Invoker::new();
    invoker.apply(&mut targets, goblin, Spell::shrink());
    invoker.apply(&mut targets, troll, Spell::enlarge());
    invoker.undo_last(&mut targets);
    assert_eq!(size(&targets, troll), Size::Normal);
    assert_eq!(size(&targets, goblin), Size::Small);
    assert_eq!(
        invoker.redo_entries().next().and_then(|e| e.get().target()),
        Some(troll)
    );
}

#[test]
fn shared_behind_one_lock() {
    let (targets, id) = goblin();
    let shared = Arc::new(Mutex::new((Invoker::<Spell>::new(), targets)));
    let handles = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut guard = shared.lock().unwrap();
                let (invoker, targets) = &mut *guard;
                invoker.apply(targets, id, Spell::shrink());
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().unwrap();
    }
    let mut guard = shared.lock().unwrap();
    let (invoker, targets) = &mut *guard;
    assert_eq!(invoker.undo_len(), 4);
    while invoker.undo_last(targets) {}
    assert_eq!(targets.get(id), Some(&Target::goblin()));
}
