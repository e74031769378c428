/// One command of the line protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET <key> <value>`; the value is the rest of the line.
    Set { key: String, value: String },
    /// `GET <key>`; the key is the rest of the line.
    Get { key: String },
    /// `EXIT`
    Exit,
}

impl Command {
    /// Parses one input line.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for blank lines,
    /// malformed `SET`s and anything that is not a known command.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        if line == "EXIT" {
            return Some(Self::Exit);
        }

        if let Some(rest) = line.strip_prefix("SET ") {
            let (key, value) = rest.split_once(' ')?;
            return Some(Self::Set {
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        if let Some(key) = line.strip_prefix("GET ") {
            return Some(Self::Get {
                key: key.to_string(),
            });
        }

        None
    }
}
