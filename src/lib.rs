/*!
 * # dgproc - Divergloss glossary processor
 *
 * A Rust library for filtering multilingual terminology glossaries and
 * building various outputs out of them.
 *
 * ## Features
 *
 * - Glossaries with content scoped by language and environment, falling
 *   back to environments declared close to the requested one
 * - Subcommands (filters and views) declaring typed, validated command
 *   line parameters, routed to them from shared collector options
 * - Views:
 *   - plain text listing
 *   - HTML bilingual dictionary
 *   - terminology rules for Pology's `check-rules` sieve
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subcmd`: Subcommand parameter declaration, routing and help
 * - `dset`: Language/environment scoped lookup of glossary fragments
 * - `glossary`: Glossary model, construction from JSON and validation
 * - `filter`: Glossary filters
 * - `view`: Glossary views
 * - `textfmt`: Plain text and HTML formatting of glossary text
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities and language-aware sorting
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the GNU General Public License v3 or later
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod dset;
pub mod errors;
pub mod file_utils;
pub mod filter;
pub mod glossary;
pub mod language_utils;
pub mod subcmd;
pub mod textfmt;
pub mod view;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, Request};
pub use dset::{ScopeDefaults, Scoped, ScopedLookup};
pub use errors::{AppError, DeclarationError, GlossaryError, UsageError};
pub use glossary::Glossary;
pub use language_utils::{language_codes_match, normalize_to_part2t};
pub use subcmd::{ParamSpec, ResolvedOptions, SubcmdHandler, SuboptParser, Value, ValueType};
