/// How a lockfile declares a pinned dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockfileNotation {
    /// `yarn.lock` style: `name@version`, `name@~version` or `name@^version`
    #[default]
    AtVersion,
    /// `package-lock.json` style: an entry `"name": {` (or `"node_modules/name": {`)
    /// whose `"version"` field equals the version
    JsonEntry,
}

/// Finds the line declaring `module@version` in a lockfile.
///
/// Matching is case-insensitive and substring based; the first declaring
/// line wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyLocator {
    notation: LockfileNotation,
    entry_keys: Vec<String>,
    version_field: String,
}

impl DependencyLocator {
    pub fn new(notation: LockfileNotation, module: &str, version: &str) -> Self {
        let module = module.to_lowercase();
        let version = version.to_lowercase();
        let entry_keys = match notation {
            LockfileNotation::AtVersion => vec![
                format!("{}@{}", module, version),
                format!("{}@~{}", module, version),
                format!("{}@^{}", module, version),
            ],
            LockfileNotation::JsonEntry => vec![
                format!("\"{}\": {{", module),
                format!("node_modules/{}\": {{", module),
            ],
        };

        Self {
            notation,
            entry_keys,
            version_field: format!("\"version\": \"{}\"", version),
        }
    }

    /// Returns the 1-indexed number of the declaring line
    pub fn find_line<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> Option<usize> {
        let mut open_entry = None;
        for (index, line) in lines.into_iter().enumerate() {
            let text = line.to_lowercase();
            let number = index + 1;

            match self.notation {
                LockfileNotation::AtVersion => {
                    if self.opens_entry(&text) {
                        return Some(number);
                    }
                }
                LockfileNotation::JsonEntry => {
                    if self.opens_entry(&text) {
                        open_entry = Some(number);
                    } else if text.contains("\"version\":") {
                        // `version` is the first field of an entry; any other
                        // version closes the candidate
                        if let Some(entry) = open_entry.take() {
                            if text.contains(self.version_field.as_str()) {
                                return Some(entry);
                            }
                        }
                    }
                }
            }
        }
        None
    }

    fn opens_entry(&self, text: &str) -> bool {
        self.entry_keys.iter().any(|key| text.contains(key.as_str()))
    }
}
