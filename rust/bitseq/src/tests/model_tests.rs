//! Randomized cross-checks against a naive `Vec<bool>` model.

use itertools::Itertools;

use crate::BitSeq;

fn model_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).join("")
}

fn random_seq(rng: &mut fastrand::Rng, len: usize) -> (BitSeq, Vec<bool>) {
    let mut seq = BitSeq::with_capacity(len as u64);
    let mut bits = Vec::with_capacity(len);
    for _ in 0..len {
        let bit = rng.bool();
        seq.push(bit);
        bits.push(bit);
    }
    (seq, bits)
}

fn reduce_rotation(amount: i64, len: usize) -> usize {
    let m = (amount.unsigned_abs() % len as u64) as usize;
    if amount >= 0 { m } else { (len - m) % len }
}

fn model_shift_left(bits: &mut Vec<bool>, n: usize, fill: bool) {
    let n = n.min(bits.len());
    bits.drain(..n);
    bits.extend(std::iter::repeat_n(fill, n));
}

fn model_shift_right(bits: &mut Vec<bool>, n: usize, fill: bool) {
    let len = bits.len();
    let n = n.min(len);
    bits.truncate(len - n);
    bits.splice(0..0, std::iter::repeat_n(fill, n));
}

fn model_value(bits: &[bool]) -> u64 {
    bits.iter().fold(0u64, |acc, &b| (acc << 1) | b as u64)
}

#[test]
fn test_randomized_mutations_match_model() {
    for seed in 0..4u64 {
        let mut rng = fastrand::Rng::with_seed(0xB17_5EED ^ seed);
        let initial = rng.usize(1..300);
        let (mut seq, mut bits) = random_seq(&mut rng, initial);

        for step in 0..300 {
            let len = bits.len();
            match rng.u32(0..10) {
                0 => {
                    if len > 0 {
                        let index = rng.usize(0..len);
                        let value = rng.bool();
                        seq.set_to(index as u64, value).unwrap();
                        bits[index] = value;
                    }
                }
                1 => {
                    let offset = rng.usize(0..=len);
                    let count = rng.usize(0..=len - offset);
                    let fill = rng.bool();
                    if fill {
                        seq.set_range(offset as u64, count as u64).unwrap();
                    } else {
                        seq.clear_range(offset as u64, count as u64).unwrap();
                    }
                    bits[offset..offset + count].fill(fill);
                }
                2 => {
                    let offset = rng.usize(0..=len);
                    let count = rng.usize(0..=len - offset);
                    seq.flip_range(offset as u64, count as u64).unwrap();
                    for bit in &mut bits[offset..offset + count] {
                        *bit = !*bit;
                    }
                }
                3 => {
                    let n = rng.usize(0..=len + 10);
                    let fill = rng.bool();
                    if rng.bool() {
                        seq.shift_left(n as u64, fill);
                        model_shift_left(&mut bits, n, fill);
                    } else {
                        seq.shift_right(n as u64, fill);
                        model_shift_right(&mut bits, n, fill);
                    }
                }
                4 => {
                    let amount = rng.i64(i64::MIN..=i64::MAX);
                    seq.rotate_left(amount);
                    if len > 0 {
                        bits.rotate_left(reduce_rotation(amount, len));
                    }
                }
                5 => {
                    let offset = rng.usize(0..=len);
                    let count = rng.usize(0..=len - offset);
                    seq.reverse_range(offset as u64, count as u64).unwrap();
                    bits[offset..offset + count].reverse();
                }
                6 => {
                    if len < 350 {
                        let pos = rng.usize(0..=len);
                        let width = rng.u32(1..=16);
                        let value = rng.u64(..) >> (64 - width);
                        seq.insert_bits(pos as u64, value, width).unwrap();
                        let inserted =
                            (0..width).map(|i| (value >> (width - 1 - i)) & 1 != 0);
                        bits.splice(pos..pos, inserted);
                    }
                }
                7 => {
                    if len > 0 {
                        let offset = rng.usize(0..len);
                        let count = rng.usize(0..=len - offset);
                        seq.delete(offset as u64, count as u64).unwrap();
                        bits.drain(offset..offset + count);
                    }
                }
                8 => {
                    let other_len = rng.usize(0..80);
                    let (other, other_bits) = random_seq(&mut rng, other_len);
                    let count = rng.usize(0..=other_len.min(len));
                    let offset = rng.usize(0..=len - count);
                    let other_offset = rng.usize(0..=other_len - count);
                    seq.xor_range(offset as u64, &other, other_offset as u64, count as u64)
                        .unwrap();
                    for k in 0..count {
                        bits[offset + k] ^= other_bits[other_offset + k];
                    }
                }
                _ => {
                    if len < 350 {
                        let offset = rng.usize(0..=len);
                        let count = rng.usize(0..=len - offset);
                        let patch_len = rng.usize(0..40);
                        let (patch, patch_bits) = random_seq(&mut rng, patch_len);
                        seq.replace(offset as u64, count as u64, &patch).unwrap();
                        bits.splice(offset..offset + count, patch_bits);
                    }
                }
            }

            assert_eq!(
                seq.to_bit_string(),
                model_string(&bits),
                "seed {seed} step {step}"
            );
            assert_eq!(seq.len(), bits.len() as u64);
            assert_eq!(
                seq.count_ones(),
                bits.iter().filter(|&&b| b).count() as u64
            );
        }
    }
}

#[test]
fn test_randomized_reads_match_model() {
    let mut rng = fastrand::Rng::with_seed(0xCAFE);
    let (seq, bits) = random_seq(&mut rng, 777);

    for _ in 0..200 {
        let offset = rng.usize(0..bits.len());
        let width = rng.usize(1..=64.min(bits.len() - offset));
        assert_eq!(
            seq.get_bits(offset as u64, width as u32).unwrap(),
            model_value(&bits[offset..offset + width])
        );

        let from = rng.usize(0..bits.len());
        let expected_next = bits[from..].iter().position(|&b| b).map(|i| (from + i) as u64);
        assert_eq!(seq.next_set_bit(from as u64), expected_next);
        let expected_prev = bits[..=from].iter().rposition(|&b| b).map(|i| i as u64);
        assert_eq!(seq.prev_set_bit(from as u64), expected_prev);
    }
}

#[test]
fn test_randomized_cross_shift_matches_concatenated_model() {
    for seed in 0..3u64 {
        let mut rng = fastrand::Rng::with_seed(0x5_71F7 + seed);
        let a_len = rng.usize(0..150);
        let (mut a, a_bits) = random_seq(&mut rng, a_len);
        let b_len = rng.usize(0..150);
        let (mut b, b_bits) = random_seq(&mut rng, b_len);
        let mut stream: Vec<bool> = a_bits.iter().chain(&b_bits).copied().collect();

        let n = rng.usize(0..=stream.len() + 5);
        let fill = rng.bool();
        if rng.bool() {
            a.shift_left_with(&mut b, n as u64, fill);
            model_shift_left(&mut stream, n, fill);
        } else {
            a.shift_right_with(&mut b, n as u64, fill);
            model_shift_right(&mut stream, n, fill);
        }

        let combined = format!("{a}{b}");
        assert_eq!(combined, model_string(&stream), "seed {seed}");
    }
}

#[test]
fn test_randomized_cross_rotate_matches_concatenated_model() {
    for seed in 0..3u64 {
        let mut rng = fastrand::Rng::with_seed(0x0707 + seed);
        let a_len = rng.usize(1..150);
        let (mut a, a_bits) = random_seq(&mut rng, a_len);
        let b_len = rng.usize(1..150);
        let (mut b, b_bits) = random_seq(&mut rng, b_len);
        let mut ring: Vec<bool> = a_bits.iter().chain(&b_bits).copied().collect();

        let amount = rng.i64(..);
        a.rotate_left_with(&mut b, amount);
        let k = reduce_rotation(amount, ring.len());
        ring.rotate_left(k);

        let combined = format!("{a}{b}");
        assert_eq!(combined, model_string(&ring), "seed {seed}");
    }
}
