//! Renderer module — markdown document assembly.

pub mod markdown;

pub use markdown::render_file;

/// Command-line value that selects the package name as the title.
pub const PACKAGE_NAME_SENTINEL: &str = ".";

/// Top-level heading of the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Title {
    /// Use the Go package name.
    PackageName,
    Text(String),
}

impl Title {
    /// Interpret a `-t` flag value; `.` selects the package name.
    pub fn from_flag(value: &str) -> Self {
        if value == PACKAGE_NAME_SENTINEL {
            Title::PackageName
        } else {
            Title::Text(value.to_string())
        }
    }

    pub fn resolve<'a>(&'a self, package_name: &'a str) -> &'a str {
        match self {
            Title::PackageName => package_name,
            Title::Text(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_selects_package_name() {
        assert_eq!(Title::from_flag("."), Title::PackageName);
        assert_eq!(Title::from_flag(".").resolve("main"), "main");
    }

    #[test]
    fn literal_title() {
        let title = Title::from_flag("My Docs");
        assert_eq!(title.resolve("main"), "My Docs");
        assert_eq!(Title::from_flag("./x").resolve("main"), "./x");
    }
}
