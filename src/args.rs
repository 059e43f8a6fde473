use std::error::Error;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a string value for a flag
    pub fn extract_value(
        &mut self,
        flag: &str,
    ) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide a value after {} for {}", flag, self.command_name)
                .into()
        })
    }

    /// Get next positional argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    /// Collect remaining args
    pub fn collect_remaining(self) -> Vec<String> {
        self.iter.collect()
    }

    pub fn unknown_flag(&self, flag: &str) -> Box<dyn Error> {
        format!("Unknown flag for {}: {flag}", self.command_name).into()
    }
}

/// Fields given on the command line for `edit`.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct EditFlags {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl EditFlags {
    pub fn parse(args: Vec<String>) -> Result<Self, Box<dyn Error>> {
        let mut parser = ArgParser::new(args, "edit");
        let mut flags = EditFlags::default();
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "--title" => flags.title = Some(parser.extract_value(&arg)?),
                "--content" => {
                    flags.content = Some(parser.extract_value(&arg)?)
                }
                other => {
                    if other.starts_with("--") {
                        return Err(parser.unknown_flag(other));
                    }
                    if flags.id.is_some() {
                        return Err(format!(
                            "Unexpected argument for edit: {other} (one id only)"
                        )
                        .into());
                    }
                    flags.id = Some(other.to_string());
                }
            }
        }
        Ok(flags)
    }

    /// Whether the caller supplied the fields directly instead of using an
    /// external editor.
    pub fn has_fields(&self) -> bool {
        self.title.is_some() || self.content.is_some()
    }
}
