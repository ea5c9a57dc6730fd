//! GaloisMatrix construction, arithmetic and mixed-operand dispatch

use galoisrs::matrix::{Axis, ReduceDim};
use galoisrs::{
    acquire_field, binary_op, build_matrix, BinaryOp, FieldHandle, GaloisError, GaloisMatrix,
    Operand, PlainMatrix,
};

fn gf8() -> FieldHandle {
    acquire_field(3, 0).unwrap()
}

fn grid(field: &FieldHandle, rows: &[Vec<i64>]) -> GaloisMatrix {
    build_matrix(field, rows).unwrap()
}

#[test]
fn test_build_rejects_out_of_range() {
    let field = gf8();
    assert_eq!(
        build_matrix(&field, &[vec![1, 8]]).unwrap_err(),
        GaloisError::OutOfRangeElement { value: 8, m: 3 }
    );
    assert!(build_matrix(&field, &[vec![1, 2], vec![3]]).is_err());
    assert!(GaloisMatrix::from_vec(2, 2, vec![1, 2, 3], &field).is_err());
}

#[test]
fn test_matmul_and_identity() {
    let field = gf8();
    let a = grid(&field, &[vec![1, 2], vec![3, 4]]);
    let i = GaloisMatrix::identity(2, &field);
    assert_eq!((&a * &i).unwrap(), a);

    // [1 2; 3 4] * [2; 1] = [1*2 + 2*1; 3*2 + 4*1] = [0; 6 ^ 4]
    let v = grid(&field, &[vec![2], vec![1]]);
    assert_eq!(a.matmul(&v).unwrap().as_slice(), &[0, 2]);

    let wide = grid(&field, &[vec![1, 2, 3]]);
    assert!(matches!(
        a.matmul(&wide),
        Err(GaloisError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_matrix_power() {
    let field = gf8();
    let a = grid(&field, &[vec![1, 2], vec![3, 4]]);
    let a3 = a.pow(3).unwrap();
    assert_eq!(a3, a.matmul(&a).unwrap().matmul(&a).unwrap());
    assert_eq!(a.pow(0).unwrap(), GaloisMatrix::identity(2, &field));
    assert_eq!(a.pow(-1).unwrap().matmul(&a).unwrap(), GaloisMatrix::identity(2, &field));

    let singular = grid(&field, &[vec![1, 1], vec![1, 1]]);
    assert_eq!(singular.pow(-1).unwrap_err(), GaloisError::SingularMatrix);
}

#[test]
fn test_mixed_operands() {
    let field = gf8();
    let a = grid(&field, &[vec![1, 2, 3]]);
    let plain = PlainMatrix::from_rows(&[vec![1, 1, 1]]).unwrap();

    let sum = binary_op(BinaryOp::Add, Operand::Galois(&a), Operand::Plain(&plain)).unwrap();
    assert_eq!(sum.as_slice(), &[0, 3, 2]);

    let scaled = binary_op(BinaryOp::ElemMul, Operand::Scalar(2), (&a).into()).unwrap();
    assert_eq!(scaled.as_slice(), &[2, 4, 6]);

    // Exponents are plain integers, not field elements
    let squared = binary_op(BinaryOp::ElemPow, (&a).into(), Operand::Scalar(9)).unwrap();
    assert_eq!(squared, a.elem_pow(2));

    let out_of_range = PlainMatrix::from_rows(&[vec![1, 9, 1]]).unwrap();
    assert_eq!(
        binary_op(BinaryOp::Add, (&a).into(), (&out_of_range).into()).unwrap_err(),
        GaloisError::OutOfRangeElement { value: 9, m: 3 }
    );
    assert!(binary_op(BinaryOp::Add, Operand::Scalar(1), Operand::Scalar(2)).is_err());
}

#[test]
fn test_division_operators() {
    let field = gf8();
    let a = grid(&field, &[vec![1, 2], vec![3, 4]]);
    let b = grid(&field, &[vec![5, 6], vec![7, 1]]);

    let x = binary_op(BinaryOp::LeftDiv, (&a).into(), (&b).into()).unwrap();
    assert_eq!(a.matmul(&x).unwrap(), b);

    let y = binary_op(BinaryOp::RightDiv, (&b).into(), (&a).into()).unwrap();
    assert_eq!(y.matmul(&a).unwrap(), b);

    let zero = grid(&field, &[vec![1, 0], vec![1, 1]]);
    assert_eq!(
        binary_op(BinaryOp::ElemDiv, (&a).into(), (&zero).into()).unwrap_err(),
        GaloisError::DivisionByZero
    );
}

#[test]
fn test_concat_checks_fields() {
    let field = gf8();
    let a = grid(&field, &[vec![1, 2]]);
    let plain = PlainMatrix::from_rows(&[vec![3, 4]]).unwrap();
    let joined = galoisrs::matrix::concat((&a).into(), (&plain).into(), Axis::Vertical).unwrap();
    assert_eq!(joined.to_int_grid(), vec![vec![1, 2], vec![3, 4]]);

    let other = GaloisMatrix::zeros(1, 2, &acquire_field(4, 0).unwrap());
    assert!(matches!(
        a.hconcat(&other),
        Err(GaloisError::FieldMismatch { .. })
    ));
}

#[test]
fn test_reductions() {
    let field = gf8();
    let a = grid(&field, &[vec![1, 2], vec![3, 4]]);
    assert_eq!(a.sum(ReduceDim::Auto).as_slice(), &[2, 6]);
    assert_eq!(a.sum(ReduceDim::Second).as_slice(), &[3, 7]);
    assert_eq!(a.product(ReduceDim::First).as_slice(), &[3, 3]);

    let squares = a.elem_mul(&a).unwrap();
    assert_eq!(squares.sqrt(), a);
    assert_eq!(a.log().exp(), a);
}

#[test]
fn test_rebind_is_atomic() {
    let gf16 = acquire_field(4, 0).unwrap();
    let mut m = build_matrix(&gf16, &[vec![1, 12]]).unwrap();
    assert!(m.rebind(&gf8()).is_err());
    assert_eq!(m.order(), 4);
    assert_eq!(m.as_slice(), &[1, 12]);

    let mut small = build_matrix(&gf16, &[vec![1, 5]]).unwrap();
    small.rebind(&gf8()).unwrap();
    assert_eq!(small.order(), 3);
}

#[test]
fn test_shape_helpers() {
    let field = gf8();
    let a = grid(&field, &[vec![1, 2, 3], vec![4, 5, 6]]);
    assert_eq!(a.transpose().shape(), (3, 2));
    assert_eq!(a.reshape(3, 2).unwrap().to_int_grid(), vec![vec![1, 5], vec![4, 3], vec![2, 6]]);
    assert_eq!(a.diag(0).unwrap().as_slice(), &[1, 5]);
    assert_eq!(a.diag(1).unwrap().as_slice(), &[2, 6]);
    assert_eq!(a.col_range(1, 3).to_int_grid(), vec![vec![2, 3], vec![5, 6]]);
}
