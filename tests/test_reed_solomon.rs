//! Reed-Solomon encode/decode across fields, layouts and shortened codes

use galoisrs::{
    acquire_field, rs_decode, rs_decode_with_config, rs_encode, rs_generator_polynomial,
    CodecConfig, FieldHandle, GaloisError, GaloisMatrix, ParityPosition, RsCode, RsOptions,
};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

fn random_messages(rng: &mut StdRng, field: &FieldHandle, rows: usize, k: usize) -> GaloisMatrix {
    let max = field.max_element() as u16;
    let data: Vec<u16> = (0..rows * k).map(|_| rng.random_range(0..=max)).collect();
    GaloisMatrix::from_vec(rows, k, data, field).unwrap()
}

/// Add `count` nonzero errors at distinct positions of every row
fn corrupt(rng: &mut StdRng, code: &GaloisMatrix, count: usize) -> GaloisMatrix {
    let max = code.field().max_element() as u16;
    let mut received = code.clone();
    for r in 0..code.rows() {
        for pos in sample(rng, code.cols(), count).iter() {
            let e = rng.random_range(1..=max);
            received.set(r, pos, received.get(r, pos) ^ e).unwrap();
        }
    }
    received
}

#[test]
fn test_rs_15_11_two_errors_per_row() {
    let field = acquire_field(4, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(15);
    let msg = random_messages(&mut rng, &field, 20, 11);

    for parity in [ParityPosition::End, ParityPosition::Beginning] {
        let options = RsOptions::new().with_parity(parity);
        let code = rs_encode(&msg, 15, 11, &options).unwrap();
        let received = corrupt(&mut rng, &code, 2);
        let decoded = rs_decode(&received, 15, 11, &options).unwrap();
        assert_eq!(decoded.error_counts, vec![2; 20]);
        assert_eq!(decoded.corrected, code);
        assert_eq!(decoded.message, msg);
    }
}

#[test]
fn test_rs_255_223_sixteen_errors() {
    let field = acquire_field(8, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(255);
    let msg = random_messages(&mut rng, &field, 4, 223);
    let options = RsOptions::default();
    let code = rs_encode(&msg, 255, 223, &options).unwrap();

    let received = corrupt(&mut rng, &code, 16);
    let decoded = rs_decode(&received, 255, 223, &options).unwrap();
    assert!(decoded.all_corrected());
    assert_eq!(decoded.total_corrected(), 64);
    assert_eq!(decoded.message, msg);
}

#[test]
fn test_shortened_code() {
    // 200 < 255 symbols, decoded against virtual leading zeros
    let field = acquire_field(8, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(200);
    let msg = random_messages(&mut rng, &field, 3, 180);

    for parity in [ParityPosition::End, ParityPosition::Beginning] {
        let options = RsOptions::new().with_parity(parity);
        let code = rs_encode(&msg, 200, 180, &options).unwrap();
        let received = corrupt(&mut rng, &code, 10);
        let decoded = rs_decode(&received, 200, 180, &options).unwrap();
        assert_eq!(decoded.error_counts, vec![10; 3]);
        assert_eq!(decoded.message, msg);
    }
}

#[test]
fn test_custom_roots() {
    let field = acquire_field(5, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(31);
    let msg = random_messages(&mut rng, &field, 5, 25);
    let options = RsOptions::new().with_roots(3, 7);
    let code = rs_encode(&msg, 31, 25, &options).unwrap();

    let received = corrupt(&mut rng, &code, 3);
    let decoded = rs_decode(&received, 31, 25, &options).unwrap();
    assert_eq!(decoded.error_counts, vec![3; 5]);
    assert_eq!(decoded.corrected, code);
}

#[test]
fn test_explicit_generator_roots_are_derived() {
    let field = acquire_field(4, 0).unwrap();
    let g = rs_generator_polynomial(&field, 6, 2, 4).unwrap();
    let code = RsCode::new(&field, 15, 9, &RsOptions::new().with_generator(g.clone())).unwrap();
    assert_eq!(code.generator(), g);
    assert_eq!(code.capability(), 3);

    let mut rng = StdRng::seed_from_u64(9);
    let msg = random_messages(&mut rng, &field, 6, 9);
    let encoded = code.encode(&msg).unwrap();
    let received = corrupt(&mut rng, &encoded, 3);
    let decoded = code.decode(&received).unwrap();
    assert!(decoded.all_corrected());
    assert_eq!(decoded.message, msg);
}

#[test]
fn test_too_many_errors_are_flagged() {
    let field = acquire_field(4, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let msg = random_messages(&mut rng, &field, 50, 11);
    let options = RsOptions::default();
    let code = rs_encode(&msg, 15, 11, &options).unwrap();
    let received = corrupt(&mut rng, &code, 3);

    let decoded = rs_decode(&received, 15, 11, &options).unwrap();
    for (r, &count) in decoded.error_counts.iter().enumerate() {
        // Either detected, or miscorrected to some other codeword
        if count == -1 {
            assert_eq!(decoded.corrected.row(r), received.row(r));
        } else {
            assert_ne!(decoded.corrected.row(r), code.row(r));
        }
    }
    assert!(decoded.error_counts.contains(&-1));
    assert!(matches!(
        decoded.require_corrected(),
        Err(GaloisError::UncorrectableError { .. })
    ));
}

#[test]
fn test_thread_configurations_agree() {
    let field = acquire_field(6, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(63);
    let msg = random_messages(&mut rng, &field, 40, 51);
    let options = RsOptions::default();
    let code = rs_encode(&msg, 63, 51, &options).unwrap();
    let received = corrupt(&mut rng, &code, 6);

    let sequential =
        rs_decode_with_config(&received, 63, 51, &options, &CodecConfig::sequential()).unwrap();
    let pooled =
        rs_decode_with_config(&received, 63, 51, &options, &CodecConfig::new(2, true)).unwrap();
    let global = rs_decode(&received, 63, 51, &options).unwrap();
    assert_eq!(sequential, pooled);
    assert_eq!(sequential, global);
    assert_eq!(sequential.message, msg);
}

#[test]
fn test_parameter_errors() {
    let field = acquire_field(4, 0).unwrap();
    let msg = GaloisMatrix::zeros(1, 11, &field);
    assert!(rs_encode(&msg, 15, 10, &RsOptions::default()).is_err());
    assert!(rs_encode(&msg, 7, 3, &RsOptions::default()).is_err());
    assert!(matches!(
        rs_decode(&GaloisMatrix::zeros(1, 14, &field), 15, 11, &RsOptions::default()),
        Err(GaloisError::DimensionMismatch { .. })
    ));
}
