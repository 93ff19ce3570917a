//! YAML frontmatter for markdown resources
//!
//! Parses frontmatter (between `---` delimiters) from source commands, agents
//! and skills, and formats the frontmatter header of generated artifacts.

mod frontmatter;

pub use frontmatter::{
    format_frontmatter, get_bool, get_str, get_str_list, parse_frontmatter_and_body,
};
