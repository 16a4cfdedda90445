//! Minimal CLI parsing.

use std::env;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Print the GraphQL SDL and exit instead of serving
    pub print_schema: bool,
}

impl CliOptions {
    pub fn from_args() -> Self {
        Self::parse(env::args().skip(1))
    }

    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = CliOptions::default();
        for arg in args {
            match arg.as_ref() {
                "--print-schema" | "--sdl" => options.print_schema = true,
                other => tracing::debug!(arg = other, "Ignoring unknown argument"),
            }
        }
        options
    }
}
