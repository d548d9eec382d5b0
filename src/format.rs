#![cfg_attr(not(feature = "colored"), allow(unused_variables))]

#[cfg(feature = "chrono")]
use chrono::{DateTime, Local, Utc};
#[cfg(feature = "colored")]
use colored::Colorize;
use core::fmt::{self, Write};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Format {
    #[cfg(feature = "colored")]
    pub colored: bool,
    pub detailed: bool,
    pub head: bool,
}

impl Default for Format {
    fn default() -> Self {
        Format {
            #[cfg(feature = "colored")]
            colored: true,
            detailed: true,
            head: true,
        }
    }
}

impl Format {
    pub fn message(self, f: &mut fmt::Formatter, msg: &impl ToString) -> fmt::Result {
        let msg = msg.to_string();
        let lines = msg.lines();
        if self.detailed {
            for line in lines {
                writeln!(f, "    {}", line.trim())?;
            }
        } else if let Some(line) = lines.map(str::trim).find(|s| !s.is_empty()) {
            f.write_str(line)?;
        }
        Ok(())
    }

    pub fn position(self, f: &mut fmt::Formatter, at: usize, undone: bool) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            let position = at.to_string();
            return if undone {
                write!(f, "{}", position.dimmed())
            } else {
                write!(f, "{}", position.yellow().bold())
            };
        }
        write!(f, "{at}")
    }

    pub fn labels(self, f: &mut fmt::Formatter, at: usize, head: usize) -> fmt::Result {
        if !(self.head && at == head) {
            return Ok(());
        }
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, " {}{}{}", "[".yellow(), "HEAD".cyan().bold(), "]".yellow());
        }
        f.write_str(" [HEAD]")
    }

    #[cfg(feature = "chrono")]
    pub fn timestamp(self, f: &mut fmt::Formatter, timestamp: &DateTime<Utc>) -> fmt::Result {
        let rfc2822 = timestamp.with_timezone(&Local).to_rfc2822();
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, " {}", rfc2822.yellow());
        }
        write!(f, " [{rfc2822}]")
    }

    pub fn separator(self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(' ')
    }
}
