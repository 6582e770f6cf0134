extern crate orrery;
#[macro_use]
extern crate approx;
extern crate rand;

use orrery::prelude::*;
use rand::Rng;

fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

#[test]
pub fn hierachy() {
    let mut graph = SceneGraph::new();
    let e1 = graph.add(Matrix4::identity());
    let e2 = graph.add(Matrix4::identity());
    let e3 = graph.add(Matrix4::identity());
    let e4 = graph.add(Matrix4::identity());

    graph.set_parent(e4, e3).unwrap();
    graph.set_parent(e3, e1).unwrap();
    graph.set_parent(e2, e1).unwrap();
    // e1 <- (e3 <- (e4), e2)

    assert!(graph.is_ancestor(e2, e1));
    assert!(graph.is_ancestor(e3, e1));
    assert!(graph.is_ancestor(e4, e1));
    assert!(graph.is_ancestor(e4, e3));

    assert!(!graph.is_ancestor(e1, e1));
    assert!(!graph.is_ancestor(e1, e2));
    assert!(!graph.is_ancestor(e1, e3));
    assert!(!graph.is_ancestor(e1, e4));
    assert!(!graph.is_ancestor(e2, e4));

    assert!(graph.is_root(e1));
    assert!(!graph.is_root(e2));
    assert!(!graph.is_root(e3));
    assert!(!graph.is_root(e4));

    assert!(!graph.is_leaf(e1));
    assert!(graph.is_leaf(e2));
    assert!(!graph.is_leaf(e3));
    assert!(graph.is_leaf(e4));

    assert_eq!(graph.children(e1).collect::<Vec<_>>(), vec![e3, e2]);
    assert_eq!(graph.descendants(e1).collect::<Vec<_>>(), vec![e3, e4, e2]);
    assert_eq!(graph.ancestors(e4).collect::<Vec<_>>(), vec![e3, e1]);
    assert_eq!(graph.roots().collect::<Vec<_>>(), vec![e1]);

    // Reparenting removes the node from the previous parent first.
    graph.set_parent(e4, e2).unwrap();
    assert!(graph.is_leaf(e3));
    assert_eq!(graph.parent(e4), Some(e2));
    assert_eq!(graph.children(e2).collect::<Vec<_>>(), vec![e4]);

    graph.remove_from_parent(e3).unwrap();
    assert!(graph.is_root(e3));
    assert_eq!(graph.children(e1).collect::<Vec<_>>(), vec![e2]);
}

#[test]
fn attach_errors() {
    let mut graph = SceneGraph::new();
    let e1 = graph.add(Matrix4::identity());
    let e2 = graph.add(Matrix4::identity());
    let e3 = graph.add(Matrix4::identity());
    graph.set_parent(e2, e1).unwrap();
    graph.set_parent(e3, e2).unwrap();

    match graph.set_parent(e1, e1) {
        Err(Error::CanNotAttachSelfAsParent) => {}
        other => panic!("unexpected {:?}", other),
    }

    match graph.set_parent(e1, e3) {
        Err(Error::CanNotAttachToDescendant(child, parent)) => {
            assert_eq!(child, e1);
            assert_eq!(parent, e3);
        }
        other => panic!("unexpected {:?}", other),
    }

    // Rejected attachs leave the tree untouched.
    assert!(graph.is_root(e1));
    assert_eq!(graph.parent(e3), Some(e2));

    graph.remove(e3).unwrap();
    assert!(graph.set_parent(e3, e1).is_err());
    assert!(graph.set_parent(e1, e3).is_err());
}

#[test]
fn composition() {
    let la = translation(1.0, 2.0, 3.0) * Matrix4::from_angle_y(Deg(30.0));
    let lb = translation(0.0, 0.0, 5.0) * Matrix4::from_nonuniform_scale(1.0, 2.0, 3.0);

    let mut graph = SceneGraph::new();
    let root = graph.add(Matrix4::identity());
    let a = graph.add(la);
    let b = graph.add(lb);
    graph.set_parent(a, root).unwrap();
    graph.set_parent(b, a).unwrap();

    graph.update_world_matrix();
    assert_ulps_eq!(graph.world_matrix(b).unwrap(), la * lb);
    assert_ulps_eq!(graph.world_matrix(a).unwrap(), la);
    assert_ulps_eq!(
        graph.world_matrix(b).unwrap(),
        graph.compose_world_matrix(b).unwrap()
    );
}

#[test]
fn translated_chain() {
    let mut graph = SceneGraph::new();
    let parent = graph.add(translation(100.0, 0.0, 0.0));
    let child = graph.add(translation(0.0, 0.0, 30.0));
    graph.set_parent(child, parent).unwrap();

    // Nothing is propagated yet.
    assert_eq!(graph.world_matrix(child), Some(Matrix4::identity()));

    graph.update_world_matrix();
    assert_ulps_eq!(
        graph.world_position(child).unwrap(),
        Vector3::new(100.0, 0.0, 30.0)
    );
}

#[test]
fn update_from_supplied_parent() {
    let mut graph = SceneGraph::new();
    let e1 = graph.add(translation(1.0, 0.0, 0.0));
    let e2 = graph.add(translation(0.0, 1.0, 0.0));
    graph.set_parent(e2, e1).unwrap();

    graph
        .update_world_matrix_from(e1, translation(0.0, 0.0, 1.0))
        .unwrap();
    assert_ulps_eq!(graph.world_position(e1).unwrap(), Vector3::new(1.0, 0.0, 1.0));
    assert_ulps_eq!(graph.world_position(e2).unwrap(), Vector3::new(1.0, 1.0, 1.0));

    graph.update_world_matrix_from(e1, None).unwrap();
    assert_ulps_eq!(graph.world_position(e2).unwrap(), Vector3::new(1.0, 1.0, 0.0));
}

#[test]
fn remove() {
    let mut graph = SceneGraph::new();
    let e1 = graph.add(Matrix4::identity());
    let e2 = graph.add(Matrix4::identity());
    let e3 = graph.add(Matrix4::identity());
    let e4 = graph.add(Matrix4::identity());
    let e5 = graph.add(Matrix4::identity());
    let e6 = graph.add(translation(6.0, 0.0, 0.0));

    graph.set_parent(e2, e1).unwrap();
    graph.set_parent(e3, e1).unwrap();
    graph.set_parent(e4, e3).unwrap();
    graph.set_parent(e5, e3).unwrap();
    graph.set_parent(e6, e2).unwrap();
    // e1 <- (e2 <- (e6), e3 <- (e4, e5))

    assert_eq!(graph.len(), 6);

    let removes = graph.remove(e3).unwrap();
    assert_eq!(removes, vec![e3, e4, e5]);
    assert!(graph.contains(e1));
    assert!(graph.contains(e2));
    assert!(!graph.contains(e3));
    assert!(!graph.contains(e4));
    assert!(!graph.contains(e5));
    assert!(graph.contains(e6));
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.children(e1).collect::<Vec<_>>(), vec![e2]);

    // Swapped nodes keep their transforms.
    assert_eq!(graph.local_position(e6), Some(Vector3::new(6.0, 0.0, 0.0)));
    graph.update_world_matrix();
    assert_eq!(graph.world_position(e6), Some(Vector3::new(6.0, 0.0, 0.0)));
}

#[test]
fn random_attachs_keep_tree_shape() {
    let mut rng = rand::thread_rng();
    let mut graph = SceneGraph::new();
    let nodes: Vec<_> = (0..32).map(|_| graph.add(Matrix4::identity())).collect();

    for _ in 0..512 {
        let child = nodes[rng.gen_range(0, nodes.len())];
        let parent = nodes[rng.gen_range(0, nodes.len())];

        let self_or_cycle = child == parent || graph.is_ancestor(parent, child);
        assert_eq!(graph.set_parent(child, parent).is_err(), self_or_cycle);
    }

    for &v in &nodes {
        match graph.parent(v) {
            Some(parent) => {
                let count = graph.children(parent).filter(|&c| c == v).count();
                assert_eq!(count, 1);
                assert!(!graph.roots().any(|r| r == v));
            }
            None => assert!(graph.roots().any(|r| r == v)),
        }

        assert!(!graph.ancestors(v).any(|a| a == v));
    }

    let total: usize = graph.roots().map(|r| 1 + graph.descendants(r).count()).sum();
    assert_eq!(total, nodes.len());
}

#[test]
fn recycled_ids() {
    let mut graph = SceneGraph::new();
    let e1 = graph.add(Matrix4::identity());
    let e2 = graph.add(Matrix4::identity());
    graph.set_parent(e2, e1).unwrap();
    graph.remove(e1).unwrap();

    // The freed slots are reused, but the stale ids never alias the new nodes.
    let e3 = graph.add(translation(1.0, 0.0, 0.0));
    let e4 = graph.add(translation(2.0, 0.0, 0.0));
    assert_eq!(e3.slot(), e1.slot());
    assert_eq!(e4.slot(), e2.slot());
    assert_ne!(e3, e1);
    assert_ne!(e4, e2);

    assert!(!graph.contains(e1));
    assert!(!graph.contains(e2));
    assert_eq!(graph.local_position(e1), None);
    assert!(graph.is_root(e3));
    assert!(graph.set_parent(e4, e1).is_err());
    assert_eq!(graph.len(), 2);
}
