//! # Configuration Reading
//!
//! This module turns a `wolfpack` config file into the list of libraries to
//! synchronize. The same logical document can be written as JSON, YAML or
//! TOML:
//!
//! ```json
//! {
//!   "version": 1,
//!   "libs": {
//!     "acme/widgets": { "tag": "v1.2.0" },
//!     "acme/gadgets": { "url": "git@example.com:acme/gadgets.git" }
//!   }
//! }
//! ```
//!
//! ## Key Components
//!
//! - **`ConfigReader`**: One implementation per file format. A reader knows
//!   which file extensions it handles and how to parse file contents into a
//!   `ConfigDocument`.
//!
//! - **`ConfigReaders`**: A registry mapping file extensions to readers. It
//!   is built once with [`ConfigReaders::with`] and only read afterwards.
//!
//! - **`ConfigDocument`**: A parsed, format-independent document that can
//!   answer whether a top-level key is present, which format version it
//!   declares, and which libraries it lists.
//!
//! [`load_libraries`] validates a document and produces `LibrarySpec`s.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::library::LibrarySpec;

/// Options of a single library entry, e.g. `tag` and `url`.
pub type LibraryOptions = BTreeMap<String, String>;

/// Library name to its options, in name order.
pub type LibraryOptionsMap = BTreeMap<String, LibraryOptions>;

/// The config format version this build understands.
pub const SUPPORTED_VERSION: i64 = 1;

/// Top-level key holding the library table.
pub const LIBS_KEY: &str = "libs";

/// A parsed config file, independent of its on-disk format.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    source: Option<PathBuf>,
    root: Map<String, Value>,
}

impl ConfigDocument {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { source: None, root }),
            other => Err(Error::ConfigParse {
                message: format!("expected a mapping at the top level, found {}", kind(&other)),
            }),
        }
    }

    fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    /// The file this document was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// The declared format version, `None` when the key is absent.
    pub fn version(&self) -> Result<Option<i64>> {
        match self.root.get("version") {
            None => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| Error::ConfigParse {
                message: format!("'version' must be an integer, found {}", kind(value)),
            }),
        }
    }

    /// The `libs` table with every option value converted to a string.
    ///
    /// A library with a `null` value has no options. Numbers and booleans
    /// are stringified; any other option value is an error.
    pub fn libraries(&self) -> Result<LibraryOptionsMap> {
        let libs = self.root.get(LIBS_KEY).ok_or_else(|| Error::MissingLibsKey {
            path: self
                .source
                .clone()
                .unwrap_or_else(|| PathBuf::from("<config>")),
        })?;

        let raw: BTreeMap<String, Option<BTreeMap<String, Value>>> =
            serde_json::from_value(libs.clone()).map_err(|e| Error::ConfigParse {
                message: format!("invalid '{}' section: {}", LIBS_KEY, e),
            })?;

        raw.into_iter()
            .map(|(name, options)| -> Result<(String, LibraryOptions)> {
                let options = options
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(key, value)| {
                        option_string(&name, &key, &value).map(|text| (key, text))
                    })
                    .collect::<Result<LibraryOptions>>()?;
                Ok((name, options))
            })
            .collect()
    }
}

/// Option values that survive the trip to a string unchanged.
///
/// Floats are not among them: YAML `tag: 2.10` reads back as `2.1`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OptionValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl OptionValue {
    fn into_string(self) -> String {
        match self {
            OptionValue::Text(s) => s,
            OptionValue::Integer(i) => i.to_string(),
            OptionValue::Flag(b) => b.to_string(),
        }
    }
}

fn option_string(library: &str, key: &str, value: &Value) -> Result<String> {
    match OptionValue::deserialize(value) {
        Ok(option) => Ok(option.into_string()),
        Err(_) => {
            let found = if value.is_f64() {
                format!("the number {} (quote it to keep it as written)", value)
            } else {
                kind(value).to_string()
            };
            Err(Error::ConfigParse {
                message: format!(
                    "option '{}' of library '{}' must be a string, integer or boolean, found {}",
                    key, library, found
                ),
            })
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// A parser for one config file format.
pub trait ConfigReader: Send + Sync {
    /// File extensions (without the dot) this reader handles.
    fn file_extensions(&self) -> &'static [&'static str];

    fn parse(&self, content: &str) -> Result<ConfigDocument>;
}

/// Reads `.json` config files.
#[derive(Debug, Default)]
pub struct JsonConfigReader;

impl ConfigReader for JsonConfigReader {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn parse(&self, content: &str) -> Result<ConfigDocument> {
        let value: Value = serde_json::from_str(content).map_err(|e| Error::ConfigParse {
            message: format!("invalid JSON: {}", e),
        })?;
        ConfigDocument::from_value(value)
    }
}

/// Reads `.yaml` and `.yml` config files.
#[derive(Debug, Default)]
pub struct YamlConfigReader;

impl ConfigReader for YamlConfigReader {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn parse(&self, content: &str) -> Result<ConfigDocument> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
                message: format!("invalid YAML: {}", e),
            })?;
        let value = serde_json::to_value(&yaml).map_err(|e| Error::ConfigParse {
            message: format!("unsupported YAML content: {}", e),
        })?;
        ConfigDocument::from_value(value)
    }
}

/// Reads `.toml` config files.
#[derive(Debug, Default)]
pub struct TomlConfigReader;

impl ConfigReader for TomlConfigReader {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["toml"]
    }

    fn parse(&self, content: &str) -> Result<ConfigDocument> {
        let table: toml::Table = content.parse().map_err(|e| Error::ConfigParse {
            message: format!("invalid TOML: {}", e),
        })?;
        let value = serde_json::to_value(&table).map_err(|e| Error::ConfigParse {
            message: format!("unsupported TOML content: {}", e),
        })?;
        ConfigDocument::from_value(value)
    }
}

/// Registry of config readers keyed by file extension.
#[derive(Clone)]
pub struct ConfigReaders {
    readers: HashMap<String, Arc<dyn ConfigReader>>,
}

impl ConfigReaders {
    /// An empty registry. Most callers want [`ConfigReaders::default`].
    pub fn empty() -> Self {
        Self {
            readers: HashMap::new(),
        }
    }

    /// Registers `reader` for each of its extensions.
    pub fn with<R: ConfigReader + 'static>(mut self, reader: R) -> Self {
        let reader: Arc<dyn ConfigReader> = Arc::new(reader);
        for ext in reader.file_extensions() {
            self.readers.insert(ext.to_string(), Arc::clone(&reader));
        }
        self
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.readers.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    /// Looks up the reader for `path` by its extension.
    pub fn reader_for(&self, path: &Path) -> Result<&dyn ConfigReader> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.readers
            .get(&extension)
            .map(|r| r.as_ref())
            .ok_or(Error::UnsupportedFormat { extension })
    }

    /// Reads and parses the config file at `path`.
    pub fn read_file(&self, path: &Path) -> Result<ConfigDocument> {
        let reader = self.reader_for(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(reader.parse(&content)?.with_source(path))
    }
}

impl Default for ConfigReaders {
    fn default() -> Self {
        Self::empty()
            .with(JsonConfigReader)
            .with(YamlConfigReader)
            .with(TomlConfigReader)
    }
}

/// Validates `document` and builds one `LibrarySpec` per `libs` entry.
///
/// The first malformed entry aborts loading.
pub fn load_libraries(document: &ConfigDocument) -> Result<Vec<LibrarySpec>> {
    if let Some(version) = document.version()? {
        if version != SUPPORTED_VERSION {
            return Err(Error::UnsupportedVersion {
                version,
                supported: SUPPORTED_VERSION,
            });
        }
    }

    document
        .libraries()?
        .iter()
        .map(|(name, options)| LibrarySpec::parse(name, options))
        .collect()
}

/// Reads `path` with the default readers and loads its libraries.
pub fn from_file(path: &Path) -> Result<Vec<LibrarySpec>> {
    let document = ConfigReaders::default().read_file(path)?;
    load_libraries(&document)
}
