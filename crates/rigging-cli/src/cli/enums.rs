use clap::ValueEnum;
use rigging_config::BuildMode;

/// Build mode selected on the command line
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ModeArg {
    /// Style injection, hot module replacement, no minification
    #[value(name = "development")]
    Development,

    /// CSS extraction, minified HTML, hashed output names
    #[value(name = "production")]
    Production,
}

impl From<ModeArg> for BuildMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Development => BuildMode::Development,
            ModeArg::Production => BuildMode::Production,
        }
    }
}
