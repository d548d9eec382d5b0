use spellcast::{Invoker, LogSlot, Spell, Target, Targets};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut targets = Targets::new();
    let goblin = targets.insert(Target::goblin());
    let mut wizard = Invoker::builder()
        .actor("Wizard")
        .connect(LogSlot::new())
        .build();

    let status = |targets: &Targets| {
        if let Some(target) = targets.get(goblin) {
            log::info!("{}", target.describe());
        }
    };

    status(&targets);
    wizard.apply(&mut targets, goblin, Spell::shrink());
    status(&targets);
    wizard.apply(&mut targets, goblin, Spell::invisibility());
    status(&targets);

    wizard.undo_last(&mut targets);
    status(&targets);
    wizard.undo_last(&mut targets);
    status(&targets);

    wizard.redo_last(&mut targets);
    status(&targets);
    wizard.redo_last(&mut targets);
    status(&targets);

    println!("{}", wizard.display());
}
