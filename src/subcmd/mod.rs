/*!
 * Subcommands and their parameters.
 *
 * The command line names subcommands as free arguments, and a collector
 * option gathers parameters for them:
 *
 * ```text
 * dgproc gloss.json text-simple -w lang:sr -w wcol:60 -w tags:a,b,,c
 * ```
 *
 * A parameter is `name` for flags, `name:value` for scalars and
 * `name:v1,v2,...` for lists, where `,,` escapes a comma inside an element.
 * When several subcommands of one category are issued, each parameter is
 * routed to every one of them that declares it.
 */

pub mod handler;
pub mod help;
pub mod parser;
pub mod router;
pub mod value;

pub use handler::{FillOptparser, SubcmdEntry, SubcmdHandler};
pub use help::DEFAULT_HELP_WRAP;
pub use parser::{ParamSpec, SubcmdDecl, SubcmdView, SuboptParser};
pub use router::{ResolvedOptions, split_list_value, to_attr_name};
pub use value::{Value, ValueType};
