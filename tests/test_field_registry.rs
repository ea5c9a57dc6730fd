//! Field construction, element arithmetic and registry sharing

use galoisrs::{
    acquire_field, default_polynomial, is_primitive, primitive_polynomials, FieldRegistry,
    GaloisError, GaloisField, PolySelector,
};
use std::sync::Arc;

#[test]
fn test_gf8_tables() {
    let field = GaloisField::new(3, 0).unwrap();
    assert_eq!(field.polynomial(), 0xb);
    assert_eq!(field.max_element(), 7);
    assert_eq!(field.size(), 8);
    assert_eq!(field.alpha_table(), &[1, 2, 4, 3, 6, 7, 5, 0]);
    // Zero's log is the sentinel n
    assert_eq!(field.log(0), 7);
    assert_eq!(field.alpha(7), 0);
}

#[test]
fn test_element_arithmetic() {
    let field = GaloisField::new(3, 0).unwrap();
    assert_eq!(field.add(3, 5), 6);
    assert_eq!(field.mul(3, 5), 4);
    assert_eq!(field.mul(0, 5), 0);
    assert_eq!(field.div(4, 2).unwrap(), 2);
    assert_eq!(field.inverse(3).unwrap(), 6);
    assert_eq!(field.pow(2, 7), 1);
    assert_eq!(field.pow(2, -1), 5);
    assert_eq!(field.div(1, 0), Err(GaloisError::DivisionByZero));
    assert!(field.inverse(0).is_err());
}

#[test]
fn test_every_order_builds() {
    for m in 1..=16 {
        let field = GaloisField::new(m, 0).unwrap();
        assert_eq!(field.polynomial(), default_polynomial(m).unwrap());
        assert!(is_primitive(field.polynomial()));
        let n = field.max_element();
        assert_eq!(field.alpha(0), 1);
        assert_eq!(field.mul(field.alpha(n - 1), field.alpha(field.modn(1))), 1);
    }
}

#[test]
fn test_construction_errors() {
    assert_eq!(
        GaloisField::new(0, 0).unwrap_err(),
        GaloisError::InvalidFieldOrder(0)
    );
    assert_eq!(
        GaloisField::new(17, 0).unwrap_err(),
        GaloisError::InvalidFieldOrder(17)
    );
    assert!(matches!(
        GaloisField::new(3, 0x13),
        Err(GaloisError::InvalidPolynomialDegree { m: 3, .. })
    ));
    assert_eq!(
        GaloisField::new(3, 0xf).unwrap_err(),
        GaloisError::ReduciblePolynomial {
            m: 3,
            polynomial: 0xf
        }
    );
}

#[test]
fn test_element_range_checks() {
    let field = GaloisField::new(4, 0).unwrap();
    assert_eq!(field.element(15).unwrap(), 15);
    assert_eq!(
        field.element(16).unwrap_err(),
        GaloisError::OutOfRangeElement { value: 16, m: 4 }
    );
    assert!(field.element(-1).is_err());
}

#[test]
fn test_registry_shares_fields() {
    let registry = FieldRegistry::new();
    let a = registry.acquire(3, 0).unwrap();
    let b = registry.acquire(3, 0xb).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(registry.ref_count(3, 0), 2);

    let c = registry.acquire(3, 0xd).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(registry.live_fields(), vec![(3, 0xb), (3, 0xd)]);

    registry.release(b);
    assert_eq!(registry.ref_count(3, 0xb), 1);
    registry.release(a);
    assert_eq!(registry.ref_count(3, 0xb), 0);
    assert_eq!(registry.live_fields(), vec![(3, 0xd)]);

    drop(c);
    assert!(registry.live_fields().is_empty());
}

#[test]
fn test_registry_rebuilds_released_field() {
    let registry = FieldRegistry::new();
    let first = registry.acquire(5, 0).unwrap();
    let tables = first.alpha_table().to_vec();
    registry.release(first);
    let second = registry.acquire(5, 0).unwrap();
    assert_eq!(second.alpha_table(), tables.as_slice());
    assert!(registry.acquire(5, 0x3f).is_err());
    assert_eq!(registry.ref_count(5, 0), 1);
}

#[test]
fn test_global_handle_helper() {
    let field = acquire_field(8, 0).unwrap();
    assert_eq!(field.polynomial(), 0x11d);
}

#[test]
fn test_primitive_polynomial_search() {
    assert_eq!(
        primitive_polynomials(5, PolySelector::All).unwrap(),
        vec![0x25, 0x29, 0x2f, 0x37, 0x3b, 0x3d]
    );
    assert_eq!(
        primitive_polynomials(5, PolySelector::Max).unwrap(),
        vec![0x3d]
    );
    assert_eq!(
        primitive_polynomials(5, PolySelector::Weight(3)).unwrap(),
        vec![0x25, 0x29]
    );
    assert!(primitive_polynomials(0, PolySelector::All).is_err());
}
