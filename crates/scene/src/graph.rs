use crate::light::{Fog, Light, LightKind};
use crate::mesh::Mesh;
use aviator_common::{NodeId, Transform};
use glam::Mat4;
use std::collections::BTreeMap;

/// Errors from scene graph operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),
    #[error("node {0:?} is not a mesh")]
    NotAMesh(NodeId),
}

/// What a node contributes to the rendered frame.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Transform-only node used to articulate sub-parts.
    Group,
    Mesh(Mesh),
    Light(Light),
}

/// A positioned element of the scene tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    pub fn mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self::with_kind(name, NodeKind::Mesh(mesh))
    }

    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self::with_kind(name, NodeKind::Light(light))
    }

    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            NodeKind::Light(l) => Some(l),
            _ => None,
        }
    }
}

/// One step of a depth-first traversal.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub id: NodeId,
    pub node: &'a Node,
    /// Local-to-world matrix including every ancestor transform.
    pub world: Mat4,
    pub depth: usize,
}

/// Retained scene tree.
///
/// Nodes live in a BTreeMap keyed by id; the tree shape is kept in the
/// per-node child lists plus the ordered root list.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<NodeId, Node>,
    roots: Vec<NodeId>,
    fog: Option<Fog>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of nodes at every depth.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn fog(&self) -> Option<&Fog> {
        self.fog.as_ref()
    }

    pub fn set_fog(&mut self, fog: Option<Fog>) {
        self.fog = fog;
    }

    /// Insert a node at the top level. Returns its id.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId::new();
        self.insert(id, None, node);
        self.roots.push(id);
        id
    }

    /// Insert a node under `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(SceneError::UnknownNode(parent))?;
        let id = NodeId::new();
        parent_node.children.push(id);
        self.insert(id, Some(parent), node);
        Ok(id)
    }

    fn insert(&mut self, id: NodeId, parent: Option<NodeId>, mut node: Node) {
        node.parent = parent;
        node.children.clear();
        tracing::trace!(node = %id.short(), name = %node.name, "node added");
        self.nodes.insert(id, node);
    }

    /// Remove a node and its whole subtree. Returns the number of nodes removed.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, SceneError> {
        let parent = self.nodes.get(&id).ok_or(SceneError::UnknownNode(id))?.parent;
        match parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn transform(&self, id: NodeId) -> Result<&Transform, SceneError> {
        self.nodes
            .get(&id)
            .map(|n| &n.transform)
            .ok_or(SceneError::UnknownNode(id))
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Result<&mut Transform, SceneError> {
        self.nodes
            .get_mut(&id)
            .map(|n| &mut n.transform)
            .ok_or(SceneError::UnknownNode(id))
    }

    pub fn mesh_mut(&mut self, id: NodeId) -> Result<&mut Mesh, SceneError> {
        match self.nodes.get_mut(&id) {
            Some(Node {
                kind: NodeKind::Mesh(mesh),
                ..
            }) => Ok(mesh),
            Some(_) => Err(SceneError::NotAMesh(id)),
            None => Err(SceneError::UnknownNode(id)),
        }
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], SceneError> {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .ok_or(SceneError::UnknownNode(id))
    }

    /// Local-to-world matrix of a node.
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, SceneError> {
        let mut node = self.nodes.get(&id).ok_or(SceneError::UnknownNode(id))?;
        let mut m = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = self
                .nodes
                .get(&parent)
                .ok_or(SceneError::UnknownNode(parent))?;
            m = node.transform.matrix() * m;
        }
        Ok(m)
    }

    /// Depth-first, pre-order traversal in insertion order.
    pub fn traverse(&self) -> Vec<Visit<'_>> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, Mat4, usize)> = self
            .roots
            .iter()
            .rev()
            .map(|id| (*id, Mat4::IDENTITY, 0))
            .collect();

        while let Some((id, parent_world, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let world = parent_world * node.transform.matrix();
            out.push(Visit {
                id,
                node,
                world,
                depth,
            });
            for child in node.children.iter().rev() {
                stack.push((*child, world, depth + 1));
            }
        }
        out
    }

    /// First node with the given name, in traversal order.
    pub fn find_named(&self, name: &str) -> Option<NodeId> {
        self.traverse()
            .into_iter()
            .find(|v| v.node.name == name)
            .map(|v| v.id)
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.nodes.values().filter(|n| n.name == name).count()
    }

    /// All lights with their node ids.
    pub fn lights(&self) -> impl Iterator<Item = (NodeId, &Light)> + '_ {
        self.nodes
            .iter()
            .filter_map(|(id, n)| n.as_light().map(|l| (*id, l)))
    }

    pub fn light_count(&self, kind: LightKind) -> usize {
        self.lights().filter(|(_, l)| l.kind() == kind).count()
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.values().filter(|n| n.as_mesh().is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::AmbientLight;
    use crate::mesh::{Geometry, Material};
    use approx::assert_relative_eq;
    use aviator_common::Color;
    use glam::Vec3;

    fn unit_mesh() -> Mesh {
        Mesh::new(
            Geometry::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]),
            Material::default(),
        )
    }

    #[test]
    fn scene_starts_empty() {
        let s = SceneGraph::new();
        assert!(s.is_empty());
        assert!(s.roots().is_empty());
        assert!(s.fog().is_none());
    }

    #[test]
    fn add_child_links_parent() {
        let mut s = SceneGraph::new();
        let root = s.add(Node::group("plane"));
        let child = s.add_child(root, Node::mesh("propeller", unit_mesh())).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.roots(), &[root]);
        assert_eq!(s.children(root).unwrap(), &[child]);
        assert_eq!(s.get(child).unwrap().parent(), Some(root));
    }

    #[test]
    fn add_child_to_unknown_parent_fails() {
        let mut s = SceneGraph::new();
        let ghost = NodeId::new();
        assert_eq!(
            s.add_child(ghost, Node::group("x")).unwrap_err(),
            SceneError::UnknownNode(ghost)
        );
        assert!(s.is_empty());
    }

    #[test]
    fn remove_drops_subtree() {
        let mut s = SceneGraph::new();
        let root = s.add(Node::group("a"));
        let mid = s.add_child(root, Node::group("b")).unwrap();
        s.add_child(mid, Node::group("c")).unwrap();
        let other = s.add(Node::group("d"));

        assert_eq!(s.remove(mid).unwrap(), 2);
        assert_eq!(s.len(), 2);
        assert!(s.children(root).unwrap().is_empty());

        assert_eq!(s.remove(root).unwrap(), 1);
        assert_eq!(s.roots(), &[other]);
    }

    #[test]
    fn world_matrix_composes_ancestors() {
        let mut s = SceneGraph::new();
        let root = s.add(
            Node::group("plane").with_transform(
                Transform::from_position(Vec3::new(0.0, 100.0, 0.0)).with_scale(Vec3::splat(0.25)),
            ),
        );
        let child = s
            .add_child(
                root,
                Node::group("propeller")
                    .with_transform(Transform::from_position(Vec3::new(60.0, 0.0, 0.0))),
            )
            .unwrap();
        let p = s.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 15.0);
        assert_relative_eq!(p.y, 100.0);
    }

    #[test]
    fn traversal_is_preorder_in_insertion_order() {
        let mut s = SceneGraph::new();
        let a = s.add(Node::group("a"));
        s.add_child(a, Node::group("a1")).unwrap();
        s.add_child(a, Node::group("a2")).unwrap();
        s.add(Node::group("b"));

        let names: Vec<_> = s.traverse().iter().map(|v| v.node.name.clone()).collect();
        assert_eq!(names, ["a", "a1", "a2", "b"]);
        let depths: Vec<_> = s.traverse().iter().map(|v| v.depth).collect();
        assert_eq!(depths, [0, 1, 1, 0]);
    }

    #[test]
    fn traversal_world_matrices_match_world_matrix() {
        let mut s = SceneGraph::new();
        let a = s.add(Node::group("a").with_transform(Transform::from_position(Vec3::X)));
        let b = s
            .add_child(a, Node::group("b").with_transform(Transform::from_position(Vec3::Y)))
            .unwrap();
        let visit = s.traverse().into_iter().find(|v| v.id == b).unwrap();
        assert_eq!(visit.world, s.world_matrix(b).unwrap());
    }

    #[test]
    fn mesh_mut_rejects_non_mesh() {
        let mut s = SceneGraph::new();
        let g = s.add(Node::group("g"));
        assert_eq!(s.mesh_mut(g).unwrap_err(), SceneError::NotAMesh(g));
        let m = s.add(Node::mesh("m", unit_mesh()));
        assert!(s.mesh_mut(m).is_ok());
    }

    #[test]
    fn counts_by_name_and_light_kind() {
        let mut s = SceneGraph::new();
        s.add(Node::mesh("sea", unit_mesh()));
        s.add(Node::light(
            "ambient",
            Light::Ambient(AmbientLight {
                color: Color::WHITE,
                intensity: 0.5,
            }),
        ));
        assert_eq!(s.count_named("sea"), 1);
        assert_eq!(s.count_named("sky"), 0);
        assert_eq!(s.light_count(LightKind::Ambient), 1);
        assert_eq!(s.light_count(LightKind::Directional), 0);
        assert_eq!(s.mesh_count(), 1);
        assert!(s.find_named("sea").is_some());
    }

    #[test]
    fn transform_mut_edits_in_place() {
        let mut s = SceneGraph::new();
        let id = s.add(Node::group("sky"));
        s.transform_mut(id).unwrap().rotation.z += 0.01;
        assert_relative_eq!(s.transform(id).unwrap().rotation.z, 0.01);
    }
}
