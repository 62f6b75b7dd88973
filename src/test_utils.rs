/// Compare two fingerprint word slices, failing with hex output so bit
/// patterns are readable in the mismatch message.
pub fn assert_words_eq(left: &[u32], right: &[u32]) {
    if left.len() != right.len() {
        panic!(
            "lengths differ: left.len() = {}, right.len() = {}",
            left.len(),
            right.len()
        );
    }
    for (i, (left_val, right_val)) in left.iter().zip(right.iter()).enumerate() {
        assert!(
            left_val == right_val,
            "words differ at index {}: {:#010x} != {:#010x}. \
             complete left side: \n{:?} \n \
             complete right side: \n{:?} \n",
            i,
            left_val,
            right_val,
            left,
            right
        );
    }
}
