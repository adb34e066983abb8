//! Schema tree parsing from files and strings.

use std::path::{Path, PathBuf};

use crate::{Error, ModuleSet, Result, error::SourceContext, validate::ValidationContext};

/// Serialization format of a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Toml,
}

impl SchemaFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(SchemaFormat::Json),
            "toml" => Some(SchemaFormat::Toml),
            _ => None,
        }
    }
}

impl ModuleSet {
    /// Parse a JSON schema tree (uses "schema.json" as filename).
    pub fn from_json_str(content: &str) -> Result<Self> {
        parse_module_set(content, "schema.json", SchemaFormat::Json)
    }

    /// Parse a TOML schema tree (uses "schema.toml" as filename).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        parse_module_set(content, "schema.toml", SchemaFormat::Toml)
    }
}

/// Parse and validate a module set from content with the given filename for
/// error reporting.
pub fn parse_module_set(content: &str, filename: &str, format: SchemaFormat) -> Result<ModuleSet> {
    let source_ctx = SourceContext::new(content, filename);
    let modules: ModuleSet = match format {
        SchemaFormat::Json => {
            serde_json::from_str(content).map_err(|e| source_ctx.json_error(e))?
        }
        SchemaFormat::Toml => toml::from_str(content).map_err(|e| source_ctx.toml_error(e))?,
    };

    let ctx = ValidationContext::new(&source_ctx);
    for module in &modules {
        ctx.validate_module(module)?;
    }
    Ok(modules)
}

/// A schema file on disk with both raw content and parsed modules.
#[derive(Debug)]
pub struct SchemaFile {
    path: PathBuf,
    content: String,
    modules: ModuleSet,
}

impl SchemaFile {
    /// Open and parse a schema file; the format follows the extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = SchemaFormat::from_path(&path)
            .ok_or_else(|| Box::new(Error::UnsupportedFormat { path: path.clone() }))?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let modules = parse_module_set(&content, &path.display().to_string(), format)?;

        Ok(Self {
            path,
            content,
            modules,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed modules.
    pub fn modules(&self) -> &ModuleSet {
        &self.modules
    }

    /// Consume the file, keeping the parsed modules.
    pub fn into_modules(self) -> ModuleSet {
        self.modules
    }
}

/// Open several schema files and merge their modules in argument order.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<ModuleSet> {
    let mut modules = ModuleSet::default();
    for path in paths {
        modules.extend(SchemaFile::open(path)?.into_modules());
    }
    Ok(modules)
}
