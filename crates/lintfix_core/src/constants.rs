//! Constants for file extensions and directory exclusions.
//!
//! The extension list covers everything the project linter can report on:
//! TypeScript and JavaScript in all their module flavours plus Vue single
//! file components.

/// File extensions of source files lintfix is willing to edit
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript
    "tsx", // TypeScript with JSX
    "mts", // TypeScript module
    "cts", // TypeScript CommonJS
    "js",  // JavaScript
    "jsx", // JavaScript with JSX
    "mjs", // JavaScript module
    "cjs", // JavaScript CommonJS
    "vue", // Vue single file component
];

/// Path fragments marking build output and dependency directories.
///
/// Matched as plain substrings against the path relative to the root.
pub const EXCLUDED_PATH_MARKERS: &[&str] =
    &["node_modules/", ".nuxt/", ".output/", "dist/", "coverage/", ".git/"];
