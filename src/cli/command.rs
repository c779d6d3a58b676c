//! Command dispatch from the positional arguments

use reqwest::Method;

use crate::errors::HttpcliError;
use crate::http;

/// One invocation of the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `url` prints the base URL; `url <base>` sets it (`-` clears)
    Url(Option<String>),
    /// `set <name> <value>` sets a header; `set <name>` removes it
    Set { name: String, value: Option<String> },
    List,
    Clear,
    Reset,
    Env,
    Session,
    /// Any other command word, taken as an HTTP method
    Request {
        method: Method,
        url: String,
        content_type: Option<String>,
        flags: RequestFlags,
    },
}

/// `-x`, `-p` and `-q` given among the arguments of an HTTP verb
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFlags {
    pub exclude: Vec<String>,
    pub pretty: bool,
    pub quiet: bool,
}

impl RequestFlags {
    /// Split switches out of `args`, returning the remaining positionals
    ///
    /// A lone `-` is a positional.
    fn extract(args: &[String]) -> Result<(Self, Vec<String>), HttpcliError> {
        let mut flags = RequestFlags::default();
        let mut positionals = Vec::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-x" | "--exclude" => {
                    let names = iter.next().ok_or_else(|| {
                        HttpcliError::Usage(format!(
                            "Expected comma-delimited list of header names following {}",
                            arg
                        ))
                    })?;
                    flags.push_excluded(names);
                }
                "-p" | "--pretty" => flags.pretty = true,
                "-q" | "--quiet" => flags.quiet = true,
                _ => {
                    if let Some(names) = arg.strip_prefix("--exclude=") {
                        flags.push_excluded(names);
                    } else if arg.len() >= 2 && arg.starts_with('-') {
                        return Err(HttpcliError::Usage(format!("Unrecognized flag: {}", arg)));
                    } else {
                        positionals.push(arg.clone());
                    }
                }
            }
        }

        Ok((flags, positionals))
    }

    fn push_excluded(&mut self, names: &str) {
        self.exclude.extend(
            names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );
    }
}

impl Command {
    /// Read the command word and its arguments
    ///
    /// Command words are case-insensitive. Context verbs take their arguments
    /// verbatim; HTTP verbs also accept `-x NAMES`, `-p` and `-q` anywhere
    /// among theirs.
    pub fn parse(word: &str, args: &[String]) -> Result<Self, HttpcliError> {
        let command = match word.to_ascii_lowercase().as_str() {
            "url" => {
                expect_arity(word, args, 0, 1)?;
                Command::Url(args.first().cloned())
            }
            "set" => {
                if args.is_empty() {
                    return Err(HttpcliError::Usage("Missing header name and value".to_string()));
                }
                expect_arity(word, args, 1, 2)?;
                Command::Set {
                    name: args[0].clone(),
                    value: args.get(1).cloned(),
                }
            }
            "list" => bare(word, args, Command::List)?,
            "clear" => bare(word, args, Command::Clear)?,
            "reset" => bare(word, args, Command::Reset)?,
            "env" => bare(word, args, Command::Env)?,
            "session" => bare(word, args, Command::Session)?,
            _ => {
                let method = http::parse(word)?;
                let (flags, args) = RequestFlags::extract(args)?;
                if args.is_empty() {
                    return Err(HttpcliError::Usage(format!("{} requires a URL argument", method)));
                }
                expect_arity(word, &args, 1, 2)?;
                Command::Request {
                    method,
                    url: args[0].clone(),
                    content_type: args.get(1).cloned(),
                    flags,
                }
            }
        };
        Ok(command)
    }

    /// Whether running the command changes the stored context
    pub fn mutates(&self) -> bool {
        match self {
            Command::Url(value) => value.is_some(),
            Command::Set { .. } | Command::Clear | Command::Reset => true,
            _ => false,
        }
    }
}

fn bare(word: &str, args: &[String], command: Command) -> Result<Command, HttpcliError> {
    expect_arity(word, args, 0, 0)?;
    Ok(command)
}

fn expect_arity(word: &str, args: &[String], min: usize, max: usize) -> Result<(), HttpcliError> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            format!("{}", min)
        } else {
            format!("{} to {}", min, max)
        };
        return Err(HttpcliError::Usage(format!(
            "{} takes {} argument(s), got {}",
            word,
            expected,
            args.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(word: &str, args: &[&str]) -> Result<Command, HttpcliError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Command::parse(word, &args)
    }

    #[test]
    fn test_context_verbs() {
        assert_eq!(parse("url", &[]).unwrap(), Command::Url(None));
        assert_eq!(parse("URL", &["-"]).unwrap(), Command::Url(Some("-".to_string())));
        assert_eq!(parse("list", &[]).unwrap(), Command::List);
        assert_eq!(parse("Reset", &[]).unwrap(), Command::Reset);
        assert_eq!(
            parse("set", &["X-Api-Key", "abc"]).unwrap(),
            Command::Set { name: "X-Api-Key".to_string(), value: Some("abc".to_string()) }
        );
        assert_eq!(
            parse("set", &["X-Api-Key"]).unwrap(),
            Command::Set { name: "X-Api-Key".to_string(), value: None }
        );
    }

    #[test]
    fn test_unknown_word_is_method() {
        assert_eq!(
            parse("get", &["/widgets"]).unwrap(),
            Command::Request {
                method: Method::GET,
                url: "/widgets".to_string(),
                content_type: None,
                flags: RequestFlags::default(),
            }
        );
        assert_eq!(
            parse("purge", &["/cache", "text/plain"]).unwrap(),
            Command::Request {
                method: Method::from_bytes(b"PURGE").unwrap(),
                url: "/cache".to_string(),
                content_type: Some("text/plain".to_string()),
                flags: RequestFlags::default(),
            }
        );
    }

    #[test]
    fn test_request_switches_anywhere() {
        let args = ["-p", "/widgets", "-x", "X-Api-Key, Accept", "text/csv", "-q"];
        let command = parse("post", &args);
        assert_eq!(
            command.unwrap(),
            Command::Request {
                method: Method::POST,
                url: "/widgets".to_string(),
                content_type: Some("text/csv".to_string()),
                flags: RequestFlags {
                    exclude: vec!["X-Api-Key".to_string(), "Accept".to_string()],
                    pretty: true,
                    quiet: true,
                },
            }
        );

        let command = parse("get", &["--exclude=Accept", "/"]).unwrap();
        let Command::Request { flags, .. } = command else {
            panic!("expected a request");
        };
        assert_eq!(flags.exclude, vec!["Accept"]);
    }

    #[test]
    fn test_request_switch_errors() {
        for args in [&["/", "-x"][..], &["/", "-v"][..], &["--frobnicate", "/"][..]] {
            let err = parse("get", args).unwrap_err();
            assert!(matches!(err, HttpcliError::Usage(_)), "{:?}", args);
        }
    }

    #[test]
    fn test_set_value_taken_verbatim() {
        assert_eq!(
            parse("set", &["X-Offset", "-5"]).unwrap(),
            Command::Set { name: "X-Offset".to_string(), value: Some("-5".to_string()) }
        );
        assert_eq!(
            parse("set", &["X-Flags", "-q"]).unwrap(),
            Command::Set { name: "X-Flags".to_string(), value: Some("-q".to_string()) }
        );
    }

    #[test]
    fn test_arity_errors_are_usage() {
        for (word, args) in [
            ("get", &[][..]),
            ("set", &[][..]),
            ("list", &["x"][..]),
            ("url", &["a", "b"][..]),
            ("post", &["a", "b", "c"][..]),
        ] {
            let err = parse(word, args).unwrap_err();
            assert!(matches!(err, HttpcliError::Usage(_)), "{} {:?}", word, args);
        }
    }

    #[test]
    fn test_mutates() {
        assert!(!parse("url", &[]).unwrap().mutates());
        assert!(parse("url", &["-"]).unwrap().mutates());
        assert!(parse("clear", &[]).unwrap().mutates());
        assert!(!parse("env", &[]).unwrap().mutates());
        assert!(!parse("get", &["/"]).unwrap().mutates());
    }
}
