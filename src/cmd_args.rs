use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Profile section to read from the profile file. Default is 'default'.
    /// A missing profile falls back to the default API URL.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    #[clap(short = 'v', long, help = "enable debug logging")]
    verbose: bool,

    #[clap(long, help = "API base URL, overrides the profile")]
    api_url: Option<String>,

    #[clap(short = 'i', long, help = "import a movie text file at start")]
    import: Option<PathBuf>,

    #[clap(long, help = "forget the saved session token and sign in again")]
    reset_session: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    api_url: Option<String>,
    import: Option<PathBuf>,
    reset_session: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            verbose: args.verbose,
            api_url: args.api_url,
            import: args.import,
            reset_session: args.reset_session,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn import(&self) -> Option<&PathBuf> {
        self.import.as_ref()
    }

    pub fn reset_session(&self) -> bool {
        self.reset_session
    }
}
