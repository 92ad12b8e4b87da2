//! Disposition resolver: the per-path state machine that turns a
//! classification plus flags (and, when needed, one line of user input)
//! into exactly one disposition.

use crate::errors::{Error, Result};
use crate::helpers::sanitize_user_path;
use crate::models::{Classification, Classified, Disposition, Flags, PromptKind};
use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

/// One interactive question. Real deployments read the controlling terminal;
/// tests script the answers. Keeping the seam this narrow leaves the state
/// machine below free of any I/O.
pub trait Prompter {
    fn ask(&mut self, kind: PromptKind, path: &Path) -> io::Result<String>;
}

/// What a prompt response asks for, before recursion gating is applied.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Decision {
    Trash,
    Permanent,
    Cancel,
}

/// Maps a raw response line. Empty input and `y`/`yes` (any case) accept the
/// trash default; `n`/`no` cancels; the exact uppercase token `D` asks for
/// permanent deletion. Anything unrecognized cancels — never deletes.
fn map_response(raw: &str) -> Decision {
    let trimmed = raw.trim();
    if trimmed == "D" {
        return Decision::Permanent;
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Decision::Trash,
        _ => Decision::Cancel,
    }
}

/// Resolves the disposition for one classified target.
///
/// Protection is checked before existence: a path under `/usr` is refused
/// as Blocked even when nothing is there, so scripts probing protected
/// locations always see the refusal. A directory whose resolved action
/// would mutate is refused with [`Error::RecursionRequired`] when the
/// recursive flag is absent, even under force.
pub fn resolve(
    classified: &Classified,
    flags: Flags,
    prompter: &mut dyn Prompter,
) -> Result<Disposition> {
    if classified.is_protected() {
        return Ok(Disposition::Blocked);
    }
    if !classified.exists {
        return Ok(Disposition::NotFound);
    }

    let is_dir = classified.is_dir();
    let decision = if flags.skip_prompts() {
        Decision::Trash
    } else {
        let kind = if is_dir {
            PromptKind::Folder
        } else if classified.class == Classification::ConfigHidden {
            PromptKind::Config
        } else {
            PromptKind::Delete
        };
        let response = prompter
            .ask(kind, &classified.resolved)
            .map_err(Error::Prompt)?;
        map_response(&response)
    };

    if is_dir && decision != Decision::Cancel && !flags.recursive {
        return Err(Error::RecursionRequired(classified.resolved.clone()));
    }

    Ok(match decision {
        Decision::Trash => Disposition::Trash { recursive: is_dir },
        Decision::Permanent => Disposition::PermanentDelete { recursive: is_dir },
        Decision::Cancel => Disposition::Cancel,
    })
}

fn prompt_text(kind: PromptKind, path: &Path) -> String {
    let shown = sanitize_user_path(path);
    match kind {
        PromptKind::Folder => {
            format!("'{shown}' is a directory. Move it and its contents to trash? [Y/n/D] ")
        }
        PromptKind::Config => {
            format!("'{shown}' looks like a configuration file. Move it to trash? [Y/n/D] ")
        }
        PromptKind::Delete => format!("Move '{shown}' to trash? [Y/n/D] "),
    }
}

/// Production prompter: writes the question to the controlling terminal and
/// blocks on one line of input, falling back to stderr + stdin when no
/// terminal is attached. There is no timeout; an interrupt signal ends the
/// whole batch.
#[derive(Debug, Default)]
pub struct TtyPrompter;

impl Prompter for TtyPrompter {
    fn ask(&mut self, kind: PromptKind, path: &Path) -> io::Result<String> {
        let text = prompt_text(kind, path);
        match OpenOptions::new().read(true).write(true).open("/dev/tty") {
            Ok(mut tty) => {
                tty.write_all(text.as_bytes())?;
                tty.flush()?;
                read_line(&mut tty)
            }
            Err(_) => {
                let mut stderr = io::stderr();
                stderr.write_all(text.as_bytes())?;
                stderr.flush()?;
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                Ok(line)
            }
        }
    }
}

fn read_line(source: &mut dyn Read) -> io::Result<String> {
    let mut line = String::new();
    BufReader::new(source).read_line(&mut line)?;
    Ok(line)
}

/// Deterministic prompter fed from a fixed answer queue. Exhausting the
/// queue cancels, mirroring end-of-input on a real stream.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    pub asked: Vec<PromptKind>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, kind: PromptKind, _path: &Path) -> io::Result<String> {
        self.asked.push(kind);
        Ok(self.answers.pop_front().unwrap_or_else(|| "n".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Classification;
    use std::path::PathBuf;

    fn classified(class: Classification, exists: bool) -> Classified {
        Classified {
            raw: PathBuf::from("victim"),
            resolved: PathBuf::from("/work/victim"),
            class,
            reason: class_reason(class),
            exists,
        }
    }

    fn class_reason(class: Classification) -> Option<String> {
        matches!(
            class,
            Classification::SystemProtected | Classification::HomeRoot
        )
        .then(|| "protected".to_string())
    }

    fn no_flags() -> Flags {
        Flags::default()
    }

    #[test]
    fn protected_paths_block_regardless_of_flags() {
        let c = classified(Classification::SystemProtected, true);
        let forced = Flags {
            force: true,
            recursive: true,
            verbose: false,
        };
        let mut prompter = ScriptedPrompter::new(["y"]);
        assert_eq!(
            resolve(&c, forced, &mut prompter).unwrap(),
            Disposition::Blocked
        );
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn protection_wins_over_absence() {
        let c = classified(Classification::SystemProtected, false);
        let mut prompter = ScriptedPrompter::default();
        assert_eq!(
            resolve(&c, no_flags(), &mut prompter).unwrap(),
            Disposition::Blocked
        );
    }

    #[test]
    fn missing_paths_resolve_to_not_found() {
        let c = classified(Classification::Plain, false);
        let mut prompter = ScriptedPrompter::default();
        assert_eq!(
            resolve(&c, no_flags(), &mut prompter).unwrap(),
            Disposition::NotFound
        );
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn affirmative_answers_and_empty_input_trash() {
        for answer in ["y", "Y", "yes", "YES", "", "  \n"] {
            let c = classified(Classification::Plain, true);
            let mut prompter = ScriptedPrompter::new([answer]);
            assert_eq!(
                resolve(&c, no_flags(), &mut prompter).unwrap(),
                Disposition::Trash { recursive: false },
                "answer {answer:?}"
            );
        }
    }

    #[test]
    fn negative_and_garbage_answers_cancel() {
        for answer in ["n", "N", "no", "NO", "maybe", "yep!", "d"] {
            let c = classified(Classification::Plain, true);
            let mut prompter = ScriptedPrompter::new([answer]);
            assert_eq!(
                resolve(&c, no_flags(), &mut prompter).unwrap(),
                Disposition::Cancel,
                "answer {answer:?}"
            );
        }
    }

    #[test]
    fn only_uppercase_d_requests_permanent_delete() {
        let c = classified(Classification::Plain, true);
        let mut prompter = ScriptedPrompter::new(["D"]);
        assert_eq!(
            resolve(&c, no_flags(), &mut prompter).unwrap(),
            Disposition::PermanentDelete { recursive: false }
        );
    }

    #[test]
    fn force_skips_prompts_and_defaults_to_trash() {
        let c = classified(Classification::ConfigHidden, true);
        let flags = Flags {
            force: true,
            recursive: false,
            verbose: false,
        };
        let mut prompter = ScriptedPrompter::default();
        assert_eq!(
            resolve(&c, flags, &mut prompter).unwrap(),
            Disposition::Trash { recursive: false }
        );
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn prompt_kind_follows_classification() {
        for (class, kind) in [
            (Classification::Directory, PromptKind::Folder),
            (Classification::ConfigHidden, PromptKind::Config),
            (Classification::Plain, PromptKind::Delete),
        ] {
            let c = classified(class, true);
            let flags = Flags {
                force: false,
                recursive: true,
                verbose: false,
            };
            let mut prompter = ScriptedPrompter::new(["y"]);
            resolve(&c, flags, &mut prompter).unwrap();
            assert_eq!(prompter.asked, vec![kind]);
        }
    }

    #[test]
    fn directory_without_recursive_flag_is_refused_even_under_force() {
        let c = classified(Classification::Directory, true);
        let forced = Flags {
            force: true,
            recursive: false,
            verbose: false,
        };
        let mut prompter = ScriptedPrompter::default();
        let err = resolve(&c, forced, &mut prompter).unwrap_err();
        assert!(matches!(err, Error::RecursionRequired(_)));
    }

    #[test]
    fn directory_cancel_needs_no_recursive_flag() {
        let c = classified(Classification::Directory, true);
        let mut prompter = ScriptedPrompter::new(["n"]);
        assert_eq!(
            resolve(&c, no_flags(), &mut prompter).unwrap(),
            Disposition::Cancel
        );
    }

    #[test]
    fn directory_with_recursive_flag_carries_recursion() {
        let c = classified(Classification::Directory, true);
        let flags = Flags {
            force: false,
            recursive: true,
            verbose: false,
        };
        let mut prompter = ScriptedPrompter::new(["D"]);
        assert_eq!(
            resolve(&c, flags, &mut prompter).unwrap(),
            Disposition::PermanentDelete { recursive: true }
        );
    }

    #[test]
    fn exhausted_script_cancels() {
        let c = classified(Classification::Plain, true);
        let mut prompter = ScriptedPrompter::default();
        assert_eq!(
            resolve(&c, no_flags(), &mut prompter).unwrap(),
            Disposition::Cancel
        );
    }
}
