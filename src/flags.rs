use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<&'static str, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    fn switch(short: &'static str, long: &'static str, description: &'static str) -> Self {
        Flag {
            short,
            long,
            description,
            takes_value: false,
            value: None,
        }
    }

    fn option(short: &'static str, long: &'static str, description: &'static str) -> Self {
        Flag {
            takes_value: true,
            ..Flag::switch(short, long, description)
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let flags = BTreeMap::from([
            ("help", Flag::switch("-h", "--help", "Print this help message")),
            ("version", Flag::switch("-v", "--version", "Show version information")),
            ("config", Flag::option("-c", "--config", "Use PATH instead of ~/.dsh_config.json")),
            ("quiet", Flag::switch("-q", "--quiet", "No banner and no exit status notices")),
            ("debug", Flag::switch("-d", "--debug", "Log debug events to ~/.dsh_log.txt")),
        ]);

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == flag.short || arg == flag.long)
                .ok_or_else(|| ShellError::Flag(format!("unknown option {}", arg)))?;

            flag.value = if flag.takes_value {
                let value = args
                    .next()
                    .ok_or_else(|| ShellError::Flag(format!("flag {} requires a value", arg)))?;
                Some(value.clone())
            } else {
                Some("true".to_string())
            };
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get_value(name).is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.flags.get(name).and_then(|f| f.value.as_deref())
    }

    pub fn print_help(&self) {
        println!("Usage: dsh [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            let long = if flag.takes_value {
                format!("{} PATH", flag.long)
            } else {
                flag.long.to_string()
            };
            println!("  {}, {:<15} {}", flag.short, long, flag.description);
        }
    }
}
