//! Parses a URDF document into a [`dynamics_model::Model`].
//!
//! Supports the subset of URDF described for this engine: `<robot>`,
//! `<link>` with `<inertial>`, and `<joint type="fixed|revolute|continuous|
//! prismatic">` with `<origin>`, `<axis>` and `<limit>`. `<visual>`,
//! `<collision>`, `<material>`, `<gazebo>` and `<transmission>` tags are
//! recognized and skipped rather than parsed.

use std::collections::{HashMap, HashSet};

use dynamics_inertia::Inertia;
use dynamics_joint::{JointLimits, JointType};
use dynamics_model::Model;
use dynamics_spatial::{SE3, SpatialRotation, Vector3D, symmetric3::Symmetric3};
use roxmltree::{Document, Node};

use crate::errors::{ParseError, extract_parameter, extract_parameter_list};

/// Parses a URDF document's bytes into a finalized [`Model`].
///
/// # Errors
/// [`ParseError::Malformed`] for invalid XML or a missing/unparsable
/// required attribute, [`ParseError::UnsupportedJointType`] for a joint
/// type outside `{fixed, revolute, continuous, prismatic}`,
/// [`ParseError::DanglingLink`] for a `<child>` naming an undeclared link,
/// [`ParseError::MultipleRoots`]/[`ParseError::CyclicModel`] when the joints
/// don't form a tree rooted at a single link.
pub fn parse_urdf(bytes: &[u8]) -> Result<Model, ParseError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ParseError::Malformed { line: 0, msg: format!("not valid UTF-8: {e}") })?;
    let doc = Document::parse(text)?;

    let robot_node = doc
        .descendants()
        .find(|n| n.has_tag_name("robot"))
        .ok_or_else(|| ParseError::Malformed { line: 0, msg: "no <robot> tag found".to_string() })?;

    let links: HashMap<String, Node> = robot_node
        .children()
        .filter(|n| n.has_tag_name("link"))
        .map(|n| (n.attribute("name").unwrap_or("").to_string(), n))
        .collect();

    let joint_nodes: Vec<Node> = robot_node.children().filter(|n| n.has_tag_name("joint")).collect();

    let mut children_of: HashMap<String, Vec<Node>> = HashMap::new();
    let mut child_links: HashSet<String> = HashSet::new();
    for joint_node in &joint_nodes {
        let parent_name = extract_parameter::<String>("link", &find_child(joint_node, "parent")?)?;
        let child_name = extract_parameter::<String>("link", &find_child(joint_node, "child")?)?;
        if !links.contains_key(&child_name) {
            return Err(ParseError::DanglingLink { link: child_name });
        }
        child_links.insert(child_name);
        children_of.entry(parent_name).or_default().push(*joint_node);
    }

    let mut roots: Vec<&String> = links.keys().filter(|name| !child_links.contains(*name)).collect();
    roots.sort();
    match roots.len() {
        0 => return Err(ParseError::CyclicModel),
        1 => {}
        _ => {
            return Err(ParseError::MultipleRoots {
                links: roots.into_iter().cloned().collect(),
            });
        }
    }
    let root_name = roots[0].clone();

    let mut model = Model::named(robot_node.attribute("name").unwrap_or(""));
    let mut visited = HashSet::new();
    visited.insert(root_name.clone());

    let root_node = links[&root_name];
    if let Some((inertia, placement)) = parse_inertial(&root_node)? {
        model.append_body(dynamics_model::WORLD_ID, inertia, placement)?;
    }
    build_subtree(&root_name, dynamics_model::WORLD_ID, &links, &children_of, &mut visited, &mut model)?;

    Ok(model.finalize()?)
}

/// Recursively attaches every joint whose `<parent>` is `link_name`, folding
/// each child link's inertia into the new joint and descending into it.
fn build_subtree(
    link_name: &str,
    link_joint_id: usize,
    links: &HashMap<String, Node>,
    children_of: &HashMap<String, Vec<Node>>,
    visited: &mut HashSet<String>,
    model: &mut Model,
) -> Result<(), ParseError> {
    let Some(mut joints) = children_of.get(link_name).cloned() else {
        return Ok(());
    };
    joints.sort_by_key(|n| n.attribute("name").unwrap_or("").to_string());

    for joint_node in joints {
        let joint_name = extract_parameter::<String>("name", &joint_node)?;
        let joint_type_str = extract_parameter::<String>("type", &joint_node)?;
        let joint_type = parse_joint_type(&joint_type_str, &joint_name)?;

        let placement = parse_origin(&joint_node)?;
        let axis = parse_axis(&joint_node)?;
        let limits = parse_limits(&joint_node, joint_type)?;

        let new_joint = model.add_joint(link_joint_id, joint_type, axis, placement, limits, joint_name)?;

        let child_name = extract_parameter::<String>("link", &find_child(&joint_node, "child")?)?;
        if !visited.insert(child_name.clone()) {
            return Err(ParseError::CyclicModel);
        }

        let child_node = links
            .get(&child_name)
            .ok_or_else(|| ParseError::DanglingLink { link: child_name.clone() })?;
        if let Some((inertia, inertial_placement)) = parse_inertial(child_node)? {
            model.append_body(new_joint, inertia, inertial_placement)?;
        }

        build_subtree(&child_name, new_joint, links, children_of, visited, model)?;
    }
    Ok(())
}

fn find_child<'a, 'input>(node: &Node<'a, 'input>, tag: &str) -> Result<Node<'a, 'input>, ParseError> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .ok_or_else(|| ParseError::Malformed {
            line: 0,
            msg: format!("<{}> is missing a <{tag}> child", node.tag_name().name()),
        })
}

fn parse_joint_type(raw: &str, joint_name: &str) -> Result<JointType, ParseError> {
    match raw {
        "fixed" => Ok(JointType::Fixed),
        "revolute" => Ok(JointType::Revolute),
        "continuous" => Ok(JointType::Continuous),
        "prismatic" => Ok(JointType::Prismatic),
        other => Err(ParseError::UnsupportedJointType {
            name: joint_name.to_string(),
            joint_type: other.to_string(),
        }),
    }
}

/// Reads `<axis xyz="...">`, defaulting to `(1, 0, 0)` when absent. The
/// resulting vector need not already be normalized; `Model::add_joint`
/// unit-normalizes it.
fn parse_axis(joint_node: &Node) -> Result<Vector3D, ParseError> {
    match joint_node.children().find(|n| n.has_tag_name("axis")) {
        Some(axis_node) => {
            let xyz = extract_parameter_list::<f64>("xyz", &axis_node, Some(3))?;
            Ok(Vector3D::new(xyz[0], xyz[1], xyz[2]))
        }
        None => Ok(Vector3D::x()),
    }
}

/// Reads `<limit lower="..." upper="...">` for a revolute/prismatic joint.
/// Missing limits, or no `<limit>` tag at all, default to unbounded. A
/// continuous joint is always unbounded regardless of any `<limit>` present,
/// since its configuration has no position bound by construction.
fn parse_limits(joint_node: &Node, joint_type: JointType) -> Result<JointLimits, ParseError> {
    if joint_type == JointType::Fixed || joint_type == JointType::Continuous {
        return Ok(JointLimits::new_unbounded(1));
    }

    let Some(limit_node) = joint_node.children().find(|n| n.has_tag_name("limit")) else {
        return Ok(JointLimits::new_unbounded(1));
    };

    let lower = extract_parameter::<f64>("lower", &limit_node).unwrap_or(f64::NEG_INFINITY);
    let upper = extract_parameter::<f64>("upper", &limit_node).unwrap_or(f64::INFINITY);
    let effort = extract_parameter::<f64>("effort", &limit_node).unwrap_or(f64::INFINITY);
    let velocity = extract_parameter::<f64>("velocity", &limit_node).unwrap_or(f64::INFINITY);

    Ok(JointLimits::new(
        effort,
        velocity,
        dynamics_spatial::configuration::Configuration::from_row_slice(&[lower]),
        dynamics_spatial::configuration::Configuration::from_row_slice(&[upper]),
        0.0,
        0.0,
        0.0,
    ))
}

/// Reads a node's `<origin xyz="..." rpy="...">` child, defaulting to the
/// identity transform when the tag is absent or an attribute is missing.
fn parse_origin(node: &Node) -> Result<SE3, ParseError> {
    let Some(origin_node) = node.children().find(|n| n.has_tag_name("origin")) else {
        return Ok(SE3::identity());
    };

    let translation = match extract_parameter_list::<f64>("xyz", &origin_node, Some(3)) {
        Ok(xyz) => Vector3D::new(xyz[0], xyz[1], xyz[2]),
        Err(_) => Vector3D::zeros(),
    };
    let rotation = match extract_parameter_list::<f64>("rpy", &origin_node, Some(3)) {
        Ok(rpy) => SpatialRotation::from_euler_angles(rpy[0], rpy[1], rpy[2]),
        Err(_) => SpatialRotation::identity(),
    };
    Ok(SE3::from_parts(translation, rotation))
}

/// Reads a link's `<inertial>` block, returning `None` when absent (zero
/// inertia contributes nothing, so callers may skip the `append_body` call).
fn parse_inertial(link_node: &Node) -> Result<Option<(Inertia, SE3)>, ParseError> {
    let Some(inertial_node) = link_node.children().find(|n| n.has_tag_name("inertial")) else {
        return Ok(None);
    };

    let mass_node = find_child(&inertial_node, "mass")?;
    let mass = extract_parameter::<f64>("value", &mass_node)?;

    let inertia_node = find_child(&inertial_node, "inertia")?;
    let ixx = extract_parameter::<f64>("ixx", &inertia_node)?;
    let ixy = extract_parameter::<f64>("ixy", &inertia_node)?;
    let ixz = extract_parameter::<f64>("ixz", &inertia_node)?;
    let iyy = extract_parameter::<f64>("iyy", &inertia_node)?;
    let iyz = extract_parameter::<f64>("iyz", &inertia_node)?;
    let izz = extract_parameter::<f64>("izz", &inertia_node)?;

    let placement = parse_origin(&inertial_node)?;
    let tensor = Symmetric3::new(ixx, iyy, izz, ixy, ixz, iyz);
    Ok(Some((Inertia::new(mass, Vector3D::zeros(), tensor), placement)))
}
