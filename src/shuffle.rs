use rand::Rng;

/// Fisher–Yates shuffle driven by the caller's generator.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..=items.len()).rev() {
        let j = rng.random_range(0..i);
        items.swap(i - 1, j);
    }
}

/// Shuffle with a fresh thread-local generator, so repeated calls on the
/// same input are independent.
pub fn shuffle_in_place<T>(items: &mut [T]) {
    shuffle(items, &mut rand::rng());
}
