use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    bdist-venv completions bash > ~/.bash_completion.d/bdist-venv\n\n\
                  Generate zsh completions:\n    bdist-venv completions zsh > ~/.zfunc/_bdist-venv\n\n\
                  Generate fish completions:\n    bdist-venv completions fish > ~/.config/fish/completions/bdist-venv.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
