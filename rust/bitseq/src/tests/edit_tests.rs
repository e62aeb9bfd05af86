use crate::BitSeq;

#[test]
fn test_push_and_append_bits() {
    let mut seq = BitSeq::new();
    seq.push(true);
    seq.push(false);
    seq.push(true);
    assert_eq!(seq.to_bit_string(), "101");

    seq.append_bits(0b0011, 4).unwrap();
    assert_eq!(seq.to_bit_string(), "1010011");

    seq.append_bits(0, 0).unwrap();
    assert_eq!(seq.len(), 7);

    // Full-word append, crossing several word boundaries
    seq.append_bits(u64::MAX, 64).unwrap();
    assert_eq!(seq.len(), 71);
    assert_eq!(seq.get_bits(7, 64).unwrap(), u64::MAX);

    assert!(seq.append_bits(0b100, 2).is_err());
    assert!(seq.append_bits(0, 65).is_err());
}

#[test]
fn test_append_sequences() {
    let mut seq = BitSeq::from_bit_str("11").unwrap();
    seq.append(&BitSeq::from_bit_str("0011").unwrap());
    assert_eq!(seq.to_bit_string(), "110011");

    let src = BitSeq::from_bit_str("10101010").unwrap();
    seq.append_range(&src, 2, 4).unwrap();
    assert_eq!(seq.to_bit_string(), "1100111010");

    seq.append(&BitSeq::new());
    assert_eq!(seq.len(), 10);

    assert!(seq.append_range(&src, 6, 3).is_err());
}

#[test]
fn test_insert() {
    let mut seq = BitSeq::from_bit_str("111000").unwrap();
    seq.insert(3, &BitSeq::from_bit_str("01").unwrap()).unwrap();
    assert_eq!(seq.to_bit_string(), "11101000");

    seq.insert_bits(0, 0b00, 2).unwrap();
    assert_eq!(seq.to_bit_string(), "0011101000");

    // Insert at the tail behaves like append
    seq.insert_bits(10, 0b1, 1).unwrap();
    assert_eq!(seq.to_bit_string(), "00111010001");

    assert!(seq.insert_bits(100, 0, 1).is_err());
    assert!(seq.insert(12, &BitSeq::new()).is_err());
}

#[test]
fn test_insert_multiword() {
    let mut seq = BitSeq::ones(128);
    let patch = BitSeq::zeros(70);
    seq.insert(64, &patch).unwrap();
    assert_eq!(seq.len(), 198);
    assert_eq!(seq.count_ones(), 128);
    assert_eq!(seq.next_clear_bit(0), Some(64));
    assert_eq!(seq.next_set_bit(64), Some(134));
}

#[test]
fn test_delete() {
    let mut seq = BitSeq::from_bit_str("1110111").unwrap();
    seq.delete(3, 1).unwrap();
    assert_eq!(seq.to_bit_string(), "111111");

    seq.delete(0, 0).unwrap();
    assert_eq!(seq.len(), 6);

    seq.delete(4, 2).unwrap();
    assert_eq!(seq.to_bit_string(), "1111");

    seq.delete(0, 4).unwrap();
    assert!(seq.is_empty());

    assert!(seq.delete(0, 1).is_err());
}

#[test]
fn test_insert_then_delete_is_identity() {
    let original = BitSeq::from_bit_str("110100111000101").unwrap();
    let patch = BitSeq::from_bit_str("0110111").unwrap();
    for pos in [0u64, 1, 7, 14, 15] {
        let mut seq = original.clone();
        seq.insert(pos, &patch).unwrap();
        assert_eq!(seq.len(), original.len() + patch.len());
        assert_eq!(seq.extract(pos, patch.len()).unwrap(), patch);
        seq.delete(pos, patch.len()).unwrap();
        assert_eq!(seq, original, "pos {pos}");
    }
}

#[test]
fn test_replace() {
    // Same length: in-place overwrite
    let mut seq = BitSeq::from_bit_str("11110000").unwrap();
    seq.replace(2, 4, &BitSeq::from_bit_str("0110").unwrap()).unwrap();
    assert_eq!(seq.to_bit_string(), "11011000");

    // Longer replacement shifts the tail out
    let mut seq = BitSeq::from_bit_str("11110000").unwrap();
    seq.replace(2, 2, &BitSeq::from_bit_str("00001").unwrap()).unwrap();
    assert_eq!(seq.to_bit_string(), "11000010000");

    // Shorter replacement pulls the tail in
    let mut seq = BitSeq::from_bit_str("11110000").unwrap();
    seq.replace(1, 5, &BitSeq::from_bit_str("0").unwrap()).unwrap();
    assert_eq!(seq.to_bit_string(), "1000");

    // Empty replacement is a delete
    let mut seq = BitSeq::from_bit_str("11110000").unwrap();
    seq.replace(2, 4, &BitSeq::new()).unwrap();
    assert_eq!(seq.to_bit_string(), "1100");

    assert!(seq.replace(3, 2, &BitSeq::new()).is_err());
}

#[test]
fn test_generation_semantics() {
    let mut seq = BitSeq::from_bit_str("1010").unwrap();
    let g0 = seq.generation();

    // Pure appends never bump
    seq.push(true);
    seq.append_bits(0b11, 2).unwrap();
    seq.append(&BitSeq::from_bit_str("01").unwrap());
    seq.insert_bits(seq.len(), 1, 1).unwrap();
    seq.insert(seq.len(), &BitSeq::from_bit_str("0").unwrap()).unwrap();
    seq.resize(20, false);
    assert_eq!(seq.generation(), g0);

    // In-place mutation never bumps
    seq.set(0).unwrap();
    seq.flip_range(0, 10).unwrap();
    seq.reverse();
    seq.rotate_left(3);
    seq.shift_right(2, false);
    assert_eq!(seq.generation(), g0);

    // Same-length replace does not move any offset
    seq.replace(0, 3, &BitSeq::from_bit_str("111").unwrap()).unwrap();
    assert_eq!(seq.generation(), g0);

    // Interior inserts, deletes, truncation and length-changing replaces bump
    seq.insert_bits(0, 1, 1).unwrap();
    let g1 = seq.generation();
    assert!(g1 > g0);
    seq.delete(5, 3).unwrap();
    let g2 = seq.generation();
    assert!(g2 > g1);
    seq.replace(0, 1, &BitSeq::from_bit_str("00").unwrap()).unwrap();
    let g3 = seq.generation();
    assert!(g3 > g2);
    seq.truncate(4);
    assert!(seq.generation() > g3);
}

#[test]
fn test_failed_edit_is_a_noop() {
    let mut seq = BitSeq::from_bit_str("101010").unwrap();
    let snapshot = seq.clone();
    let g = seq.generation();

    assert!(seq.insert_bits(7, 0, 1).is_err());
    assert!(seq.delete(3, 10).is_err());
    assert!(seq.replace(5, 3, &BitSeq::new()).is_err());
    assert!(seq.set_bits(4, 4, 0).is_err());

    assert_eq!(seq, snapshot);
    assert_eq!(seq.generation(), g);
}
