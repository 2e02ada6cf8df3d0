//! Implementation of the `bar completion` and hidden `bar __complete`
//! commands.
//!
//! Scripts come from `clap_complete`. For bash and fish a short hook is
//! appended that routes words after `bar build` through `bar __complete`,
//! so grammar tokens complete as well as subcommands and flags.

use crate::cli::{Cli, CompleteArgs, CompletionArgs};
use crate::completion::complete_build;
use crate::context::Session;
use crate::error::{BarError, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::{self, Write};
use tracing::debug;

const BIN_NAME: &str = "bar";

const BASH_TOKEN_HOOK: &str = r#"
_bar_build_tokens() {
    if [[ ${COMP_CWORD} -ge 2 && "${COMP_WORDS[1]}" == "build" ]]; then
        local IFS=$'\n'
        COMPREPLY=($(bar __complete "${COMP_WORDS[@]:2:COMP_CWORD-1}" 2>/dev/null | cut -f1))
        return 0
    fi
    _bar "$@"
}
complete -F _bar_build_tokens -o bashdefault -o default bar
"#;

const FISH_TOKEN_HOOK: &str = r#"
complete -c bar -n "__fish_seen_subcommand_from build" -f -a "(bar __complete (commandline -opc)[3..-1] (commandline -ct) 2>/dev/null)"
"#;

/// Execute the `bar completion` command.
pub fn cmd_completion(args: CompletionArgs) -> Result<()> {
    write_completion(args.shell, &mut io::stdout())
        .map_err(|e| BarError::UserError(format!("failed to write completion script: {}", e)))
}

/// Write the completion script for `shell`.
pub(super) fn write_completion<W: Write>(shell: Shell, out: &mut W) -> io::Result<()> {
    clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, out);

    let hook = match shell {
        Shell::Bash => BASH_TOKEN_HOOK,
        Shell::Fish => FISH_TOKEN_HOOK,
        _ => "",
    };
    out.write_all(hook.as_bytes())
}

/// Execute the hidden `bar __complete` command.
///
/// Runs inside the shell on every TAB, so a missing or broken grammar
/// yields no suggestions rather than an error.
pub fn cmd_complete(session: Result<Session>, args: CompleteArgs) -> Result<()> {
    let grammar = match session.and_then(|session| session.grammar()) {
        Ok(grammar) => grammar,
        Err(err) => {
            debug!(error = %err, "no grammar for completion");
            return Ok(());
        }
    };

    for suggestion in complete_build(&grammar, &args.words) {
        println!("{}", suggestion.to_line());
    }
    Ok(())
}
