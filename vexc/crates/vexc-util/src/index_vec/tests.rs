use super::*;

define_index!(TestId);

#[test]
fn push_then_index_round_trips() {
    let mut v: IndexVec<TestId, &str> = IndexVec::new();
    let a = v.push("alpha");
    let b = v.push("beta");
    assert_eq!(v[a], "alpha");
    assert_eq!(v[b], "beta");
}

#[test]
fn iter_enumerated_pairs_indices_in_order() {
    let mut v: IndexVec<TestId, u32> = IndexVec::new();
    v.push(10);
    v.push(20);
    v.push(30);
    let pairs: Vec<_> = v.iter_enumerated().map(|(i, x)| (i.index(), *x)).collect();
    assert_eq!(pairs, vec![(0, 10), (1, 20), (2, 30)]);
}
