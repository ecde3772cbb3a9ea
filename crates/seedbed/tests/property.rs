use proptest::prelude::*;
use seedbed::{Registry, SeedTemplate, TypeHierarchy, TypeTag, covers};

fn tag(index: usize) -> TypeTag {
    match index {
        0 => TypeTag::of::<u8>(),
        1 => TypeTag::of::<u16>(),
        2 => TypeTag::of::<u32>(),
        _ => TypeTag::of::<u64>(),
    }
}

fn hierarchy(edges: &[(usize, usize)]) -> TypeHierarchy {
    let mut hierarchy = TypeHierarchy::new();
    for &(sub, sup) in edges {
        hierarchy.declare(tag(sub), tag(sup));
    }
    hierarchy
}

/// Tries every injective assignment of objects to declared slots.
fn brute_force(hierarchy: &TypeHierarchy, runtime: &[TypeTag], declared: &[TypeTag]) -> bool {
    fn assign(hierarchy: &TypeHierarchy, runtime: &[TypeTag], declared: &[TypeTag], used: &mut [bool]) -> bool {
        let Some((slot, rest)) = declared.split_first() else { return true };
        for (index, object) in runtime.iter().enumerate() {
            if used[index] || !hierarchy.is_subtype_or_equal(*object, *slot) {
                continue;
            }
            used[index] = true;
            if assign(hierarchy, runtime, rest, used) {
                return true;
            }
            used[index] = false;
        }
        false
    }

    assign(hierarchy, runtime, declared, &mut vec![false; runtime.len()])
}

proptest! {
    #[test]
    fn matcher_agrees_with_permutation_search(
        runtime in proptest::collection::vec(0..4usize, 0..7),
        declared in proptest::collection::vec(0..4usize, 0..5),
        edges in proptest::collection::vec((0..4usize, 0..4usize), 0..5),
    ) {
        let hierarchy = hierarchy(&edges);
        let runtime: Vec<TypeTag> = runtime.into_iter().map(tag).collect();
        let declared: Vec<TypeTag> = declared.into_iter().map(tag).collect();

        prop_assert_eq!(
            covers(&hierarchy, &runtime, &declared),
            brute_force(&hierarchy, &runtime, &declared)
        );
    }

    #[test]
    fn matching_ignores_object_order(
        runtime in proptest::collection::vec(0..4usize, 0..7),
        declared in proptest::collection::vec(0..4usize, 1..5),
        edges in proptest::collection::vec((0..4usize, 0..4usize), 0..5),
    ) {
        let hierarchy = hierarchy(&edges);
        let mut runtime: Vec<TypeTag> = runtime.into_iter().map(tag).collect();
        let declared: Vec<TypeTag> = declared.into_iter().map(tag).collect();

        let forward = covers(&hierarchy, &runtime, &declared);
        runtime.reverse();
        prop_assert_eq!(forward, covers(&hierarchy, &runtime, &declared));
    }

    #[test]
    fn registry_lookup_returns_exactly_the_covered_seeds(
        templates in proptest::collection::vec(proptest::collection::vec(0..4usize, 1..4), 1..6),
        runtime in proptest::collection::vec(0..4usize, 0..5),
    ) {
        let registry = Registry::new();
        let mut registered = Vec::new();
        for (index, types) in templates.iter().enumerate() {
            let template: SeedTemplate = types
                .iter()
                .enumerate()
                .map(|(slot, ty)| (format!("seed{index}_slot{slot}"), tag(*ty)))
                .collect();
            let declared: Vec<TypeTag> = template.types().collect();
            registry.seed_with::<Marker, _>(template, |_| Ok(())).unwrap();
            registered.push(declared);
        }

        let runtime: Vec<TypeTag> = runtime.into_iter().map(tag).collect();
        let expected = registered
            .iter()
            .filter(|declared| brute_force(&TypeHierarchy::new(), &runtime, declared))
            .count();
        prop_assert_eq!(registry.available_seeds_for_types(&runtime).len(), expected);
    }
}

#[derive(Debug)]
struct Marker;

impl seedbed::Seedable for Marker {
    fn has_attribute(_name: &str) -> bool {
        false
    }

    fn construct(_attributes: seedbed::AttributeMap) -> Result<Self, seedbed::SeedError> {
        Ok(Self)
    }
}
