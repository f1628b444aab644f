#![no_main]

use libfuzzer_sys::fuzz_target;
use rundo_text::{DeltaKind, diff};

fuzz_target!(|input: (&str, &str)| {
    let (old, new) = input;
    if old.len() > 4096 || new.len() > 4096 {
        return;
    }

    let delta = diff(old, new);

    // Region stays inside both texts.
    assert!(delta.start() <= delta.old_end() && delta.old_end() <= old.len());
    assert!(delta.start() <= delta.new_end() && delta.new_end() <= new.len());

    // Unchanged exactly when the texts are equal.
    assert_eq!(delta.kind() == DeltaKind::Unchanged, old == new);

    // Round trip in both directions.
    assert_eq!(delta.apply_forward(old).expect("forward fits old"), new);
    assert_eq!(delta.apply_inverse(new).expect("inverse fits new"), old);
});
