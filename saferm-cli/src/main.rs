use saferm_core::prelude::*;
use std::env;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug)]
struct CliError(String);

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
enum Invocation {
    Run { flags: Flags, paths: Vec<PathBuf> },
    PrintHelp,
    PrintVersion,
}

fn print_help(prog: &str) {
    println!(
        "\
usage: {prog} [-f] [-r] [-v] [-h] [--version] PATH...

Remove files safely: targets are moved to the trash by default, with
prompts for directories and configuration files. Protected system paths
and your home directory are never removed.

options:
  -f, --force      skip prompts; targets go to the trash
  -r, -R, --recursive
                   allow directories (required to remove a directory)
  -v, --verbose    print a confirmation for every action
  -h, --help       show this help message and exit
      --version    show program's version number and exit

Answer prompts with Y (or Enter) to trash, n to keep, D to delete
permanently.

exit status:
  0  all paths processed
  1  a path was cancelled, missing, or failed
  2  a path was refused by a protection rule
  3  the trash directories could not be initialized
"
    );
}

fn parse_args(args: &[String]) -> std::result::Result<Invocation, CliError> {
    let mut flags = Flags::default();
    let mut paths = Vec::new();
    let mut flags_done = false;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if flags_done || !arg.starts_with('-') || arg == "-" {
            paths.push(PathBuf::from(arg));
        } else {
            match arg.as_str() {
                "--" => flags_done = true,
                "--help" | "-h" => return Ok(Invocation::PrintHelp),
                "--version" => return Ok(Invocation::PrintVersion),
                "--force" => flags.force = true,
                "--recursive" => flags.recursive = true,
                "--verbose" => flags.verbose = true,
                short if short.starts_with('-') && !short.starts_with("--") => {
                    for ch in short.chars().skip(1) {
                        match ch {
                            'f' => flags.force = true,
                            'r' | 'R' => flags.recursive = true,
                            'v' => flags.verbose = true,
                            'h' => return Ok(Invocation::PrintHelp),
                            other => {
                                return Err(CliError(format!("invalid option -- '{other}'")))
                            }
                        }
                    }
                }
                unknown => return Err(CliError(format!("unrecognized option '{unknown}'"))),
            }
        }
        i += 1;
    }

    if paths.is_empty() {
        return Err(CliError("missing operand".to_string()));
    }
    Ok(Invocation::Run { flags, paths })
}

fn main() {
    let argv: Vec<String> = env::args().collect();
    let prog = argv
        .first()
        .map(|arg| {
            std::path::Path::new(arg)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("saferm")
                .to_string()
        })
        .unwrap_or_else(|| "saferm".to_string());

    let invocation = match parse_args(argv.get(1..).unwrap_or(&[])) {
        Ok(invocation) => invocation,
        Err(err) => {
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "{prog}: {err}");
            let _ = writeln!(stderr, "Try '{prog} --help' for more information.");
            std::process::exit(1);
        }
    };

    let (flags, paths) = match invocation {
        Invocation::PrintHelp => {
            print_help(&prog);
            return;
        }
        Invocation::PrintVersion => {
            println!("{prog} {VERSION}");
            return;
        }
        Invocation::Run { flags, paths } => (flags, paths),
    };

    let environ: EnvMap = env::vars().collect();
    let fs = RealFileSystem;
    let mut prompter = TtyPrompter;
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let status = run_batch(
        &fs,
        &environ,
        flags,
        &paths,
        &mut prompter,
        &mut stdout,
        &mut stderr,
    );
    std::process::exit(status.as_code() as i32);
}
