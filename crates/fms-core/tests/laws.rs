use fms_core::{
    ArrayView, Cap, Foldable, Iota, Iterable, Monoid, Standard, Take, drop, equal, fold, reduce,
    size, size_from,
};

#[test]
fn progression_law() {
    let mut i = Iota::with_step(3_i64, 7);
    for k in 0..=10_000_i64 {
        assert_eq!(i.current(), 3 + k * 7);
        i.advance();
    }
}

#[test]
fn bounded_prefix_law() {
    let t = Take::new(3, Iota::new(0));
    assert_eq!(size(t.clone()), 3);
    assert!(equal(t, ArrayView::new(&[0, 1, 2])));
}

#[test]
fn size_additivity() {
    let n = size(Take::new(2, Iota::new(0)));
    assert_eq!(size_from(Take::new(3, Iota::new(0)), n), 5);
}

#[test]
fn equality_under_length_mismatch() {
    let a = [1.0, 2.0, 3.0];
    assert!(!equal(Take::new(2, Iota::new(1.0)), ArrayView::new(&a)));
    assert!(!equal(ArrayView::new(&a), Take::new(4, Iota::new(1.0))));
    assert!(equal(Take::new(3, Iota::new(1.0)), ArrayView::new(&a)));
}

#[test]
fn fold_identity_laws() {
    let add = Standard::Add;
    let empty: i32 = fms_core::fold!(add);
    assert_eq!(empty, 0);
    assert_eq!(fms_core::fold!(add, 5), 5);
    assert_eq!(fms_core::fold!(add, 1, 2, 3), 6);
    assert_eq!(fms_core::fold!(Standard::Mul, 1, 2, 3, 4), 24);
    assert_eq!(fms_core::fold!(Standard::Max, -5, 3, 0), 3);
    assert_eq!(fold(&Standard::Max, &[-5.0, 3.0, 0.0]), 3.0);
}

#[test]
fn scan_law() {
    let xs = [1.0, 2.0, 3.0];
    let add = Standard::Add;
    let mut s = Foldable::new(&add, ArrayView::new(&xs));
    let end = s.end();
    for expected in [0.0, 1.0, 3.0, 6.0] {
        assert!(s.is_live());
        assert_eq!(s.current(), expected);
        s.advance();
    }
    assert!(!s.is_live());
    assert_eq!(s, end);
}

#[test]
fn intersection() {
    let a = [1, 3, 5, 7];
    let b = [2, 3, 4, 5];
    let c = Cap::new(ArrayView::new(&a), ArrayView::new(&b));
    assert!(equal(c, ArrayView::new(&[3, 5])));
}

#[test]
fn array_view_round_trip() {
    let buf = [1, 2, 3];
    let v = ArrayView::new(&buf);
    assert_eq!(v.len(), 3);
    let mut w = v;
    w.advance();
    w.advance();
    w.advance();
    assert_eq!(w, v.end());
    assert_eq!(w - v, 3);
    assert_eq!(w - 3usize, v);
    assert_eq!(v - v.begin(), 0);
    assert_eq!((v + 1usize) - v, 1);
    assert_eq!(v[2], 3);
    let back: Vec<i32> = v.iter().collect();
    assert_eq!(back, buf);
}

#[test]
fn drop_then_take_is_a_window() {
    let xs: Vec<u32> = Take::new(3, drop(5, Iota::new(0u32))).iter().collect();
    assert_eq!(xs, [5, 6, 7]);
}

#[test]
fn reduce_matches_fold() {
    let xs = [2.0, 8.0, -1.0, 4.0];
    for m in Standard::ALL {
        assert_eq!(reduce(&m, ArrayView::new(&xs)), fold(&m, &xs), "{m:?}");
    }
    let boxed: Box<dyn Monoid<f64>> = Box::new(Standard::Mul);
    assert_eq!(reduce(&boxed, ArrayView::new(&xs)), -64.0);
}
