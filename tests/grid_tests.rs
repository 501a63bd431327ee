use drape::{ClothConfig, ClothGrid, Scene, SpringKind, Vec3};

#[test]
fn point_and_spring_counts_for_every_density() {
    let config: ClothConfig<f32> = ClothConfig::new();
    for d in 1..=8usize {
        let grid = Scene::Hammock.build(d, &config).unwrap();
        let springs = grid.springs();
        assert_eq!(grid.point_count(), (d + 1) * (d + 1), "density {}", d);
        assert_eq!(springs.count_of(SpringKind::Structural), 2 * d * (d + 1), "density {}", d);
        assert_eq!(springs.count_of(SpringKind::Shear), 2 * d * d, "density {}", d);
        assert_eq!(springs.count_of(SpringKind::Flexion), 2 * d * (d - 1), "density {}", d);
    }
}

#[test]
fn every_spring_appears_once_and_is_symmetric() {
    let grid = ClothGrid::new(5, 1.0f64, |i, j| Vec3::new(j as f64, 0.0, i as f64), |_, _| false).unwrap();
    let springs = grid.springs();
    let mut seen = std::collections::HashSet::new();
    for s in springs.springs() {
        let key = (s.a.min(s.b), s.a.max(s.b));
        assert!(seen.insert(key), "duplicate spring {:?}", key);
        assert!(springs.connected(s.a, s.b));
        assert!(springs.connected(s.b, s.a));
    }
}

#[test]
fn rest_lengths_by_class() {
    let spacing = 0.5f32;
    let grid = ClothGrid::new(4, spacing, |_, _| Vec3::zero(), |_, _| false).unwrap();
    for s in grid.springs().springs() {
        let expected = match s.kind {
            SpringKind::Structural => spacing,
            SpringKind::Shear => spacing * 2.0f32.sqrt(),
            SpringKind::Flexion => spacing * 2.0,
        };
        assert!((s.rest_length - expected).abs() < 1e-6);
    }
}

#[test]
fn interior_point_has_twelve_partners() {
    let grid = ClothGrid::new(6, 1.0f32, |_, _| Vec3::zero(), |_, _| false).unwrap();
    let center = grid.index(3, 3);
    assert_eq!(grid.springs().neighbors(center).len(), 12);
    // Corner: two structural, one shear, two flexion.
    assert_eq!(grid.springs().neighbors(grid.index(0, 0)).len(), 5);
}
