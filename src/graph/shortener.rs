use std::path::Path;

use super::node::ModuleInfo;

/// Shortens absolute module requests relative to the project root for display.
///
/// Each `!`-separated segment of a request (loaders first, resource last) is
/// shortened independently, so `/proj/loader.js!/proj/src/a.js` becomes
/// `./loader.js!./src/a.js`.
#[derive(Debug, Clone)]
pub struct RequestShortener {
    root: String,
}

impl RequestShortener {
    pub fn new(root: &Path) -> Self {
        let mut root = root.to_string_lossy().into_owned();
        while root.len() > 1 && root.ends_with('/') {
            root.pop();
        }
        Self { root }
    }

    /// Shorten a full request string.
    pub fn shorten(&self, request: &str) -> String {
        request
            .split('!')
            .map(|segment| self.shorten_segment(segment))
            .collect::<Vec<_>>()
            .join("!")
    }

    fn shorten_segment(&self, segment: &str) -> String {
        if self.root.is_empty() || self.root == "/" {
            return segment.to_owned();
        }
        match segment.strip_prefix(self.root.as_str()) {
            Some("") => ".".to_owned(),
            Some(rest) if rest.starts_with('/') => format!(".{rest}"),
            _ => segment.to_owned(),
        }
    }

    /// Human-readable identifier for a module.
    pub fn readable_identifier(&self, module: &ModuleInfo) -> String {
        self.shorten(&module.identifier)
    }

    /// Path of `module` relative to the root, used as the logical module path
    /// passed to source mapping. Falls back to the readable identifier for
    /// modules that are not backed by a file under the root.
    pub fn module_path(&self, module: &ModuleInfo) -> String {
        module
            .resource
            .as_deref()
            .and_then(|resource| resource.strip_prefix(&self.root).ok())
            .map(|rel| rel.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.readable_identifier(module))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_shortens_paths_under_root() {
        let shortener = RequestShortener::new(Path::new("/proj/"));
        assert_eq!(shortener.shorten("/proj/src/a.js"), "./src/a.js");
        assert_eq!(shortener.shorten("/proj"), ".");
        assert_eq!(
            shortener.shorten("/project-other/a.js"),
            "/project-other/a.js",
            "sibling directories sharing a prefix must not be shortened"
        );
    }

    #[test]
    fn test_shortens_each_loader_segment() {
        let shortener = RequestShortener::new(Path::new("/proj"));
        let request = "/proj/node_modules/next/dist/build/webpack/loaders/next-app-loader.js?page=x!/proj/app/page.js";
        assert_eq!(
            shortener.shorten(request),
            "./node_modules/next/dist/build/webpack/loaders/next-app-loader.js?page=x!./app/page.js"
        );
    }

    #[test]
    fn test_module_path_prefers_resource() {
        let shortener = RequestShortener::new(Path::new("/proj"));
        let module = ModuleInfo {
            identifier: "babel-loader!/proj/pages/index.js".into(),
            resource: Some(PathBuf::from("/proj/pages/index.js")),
            ..ModuleInfo::default()
        };
        assert_eq!(shortener.module_path(&module), "pages/index.js");

        let virtual_module = ModuleInfo {
            identifier: "/proj/virtual.js".into(),
            ..ModuleInfo::default()
        };
        assert_eq!(shortener.module_path(&virtual_module), "./virtual.js");
    }
}
