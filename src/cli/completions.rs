use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    agentport completions bash > ~/.bash_completion.d/agentport\n\n\
                  Generate zsh completions:\n    agentport completions zsh > ~/.zfunc/_agentport\n\n\
                  Generate fish completions:\n    agentport completions fish > ~/.config/fish/completions/agentport.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
