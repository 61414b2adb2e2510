//! Errors produced while parsing a URDF document into a [`dynamics_model::Model`].

use std::fmt::Display;

use dynamics_model::ModelError;

/// Errors that can occur while turning a URDF byte buffer into a `Model`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The document is not well-formed XML, or a required tag/attribute is
    /// missing or unparsable. `line` is the 1-based row reported by the XML
    /// reader (0 when no position is available).
    Malformed { line: u32, msg: String },
    /// A `<joint type="...">` attribute names something other than
    /// `fixed`/`revolute`/`continuous`/`prismatic`.
    UnsupportedJointType { name: String, joint_type: String },
    /// No link is without an incoming joint, or the tree has a circular
    /// parent/child reference, or a link is claimed as the child of more
    /// than one joint.
    CyclicModel,
    /// More than one link has no incoming joint.
    MultipleRoots { links: Vec<String> },
    /// A joint's `<child link="...">` names a link absent from the document.
    DanglingLink { link: String },
    /// The assembled tree was rejected by [`dynamics_model::Model::finalize`].
    ModelError(ModelError),
}

impl ParseError {
    fn malformed(msg: impl Into<String>) -> Self {
        ParseError::Malformed { line: 0, msg: msg.into() }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Malformed { line, msg } => {
                if *line > 0 {
                    write!(f, "line {line}: {msg}")
                } else {
                    write!(f, "{msg}")
                }
            }
            ParseError::UnsupportedJointType { name, joint_type } => write!(
                f,
                "joint '{name}' has unsupported type '{joint_type}'"
            ),
            ParseError::CyclicModel => write!(f, "joint tree is cyclic or not a tree"),
            ParseError::MultipleRoots { links } => {
                write!(f, "more than one root link: {}", links.join(", "))
            }
            ParseError::DanglingLink { link } => {
                write!(f, "link '{link}' is referenced but never declared")
            }
            ParseError::ModelError(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ModelError> for ParseError {
    fn from(e: ModelError) -> Self {
        ParseError::ModelError(e)
    }
}

impl From<roxmltree::Error> for ParseError {
    fn from(e: roxmltree::Error) -> Self {
        ParseError::Malformed { line: 0, msg: e.to_string() }
    }
}

/// Extracts a required attribute from `node` and parses it as `T`.
pub(crate) fn extract_parameter<T: std::str::FromStr>(
    name: &str,
    node: &roxmltree::Node,
) -> Result<T, ParseError> {
    node.attribute(name)
        .ok_or_else(|| ParseError::malformed(format!("<{}> is missing attribute '{name}'", node.tag_name().name())))?
        .parse::<T>()
        .map_err(|_| ParseError::malformed(format!("attribute '{name}' on <{}> is not parsable", node.tag_name().name())))
}

/// Extracts a required whitespace-separated attribute list from `node`,
/// parsing each entry as `T`. When `expected_length` is given, the parsed
/// list's length must match it exactly.
pub(crate) fn extract_parameter_list<T: std::str::FromStr>(
    name: &str,
    node: &roxmltree::Node,
    expected_length: Option<usize>,
) -> Result<Vec<T>, ParseError> {
    let values = node
        .attribute(name)
        .ok_or_else(|| ParseError::malformed(format!("<{}> is missing attribute '{name}'", node.tag_name().name())))?
        .split_whitespace()
        .map(|s| {
            s.parse::<T>().map_err(|_| {
                ParseError::malformed(format!("attribute '{name}' on <{}> is not parsable", node.tag_name().name()))
            })
        })
        .collect::<Result<Vec<T>, ParseError>>()?;
    if let Some(expected_length) = expected_length {
        if values.len() != expected_length {
            return Err(ParseError::malformed(format!(
                "attribute '{name}' expects {expected_length} values, got {}",
                values.len()
            )));
        }
    }
    Ok(values)
}
