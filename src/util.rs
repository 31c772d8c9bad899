/// A simplified and const generic version of arrayref
#[inline]
fn take<const N: usize>(data: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&data[..N]);
    out
}

#[inline]
pub(crate) fn get_split<const N: usize>(data: &[u8]) -> Option<([u8; N], &[u8])> {
    data.get(N..).map(|d| (take::<N>(data), d))
}

#[inline]
pub(crate) fn divmod_f32(value: f32, divisor: f32) -> (f32, f32) {
    (value.div_euclid(divisor), value.rem_euclid(divisor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(7.5, 2.0, (3.0, 1.5))]
    #[case(-1.0, 4.0, (-1.0, 3.0))]
    fn test_divmod_f32(#[case] value: f32, #[case] divisor: f32, #[case] expected: (f32, f32)) {
        assert_eq!(divmod_f32(value, divisor), expected);
    }

    #[test]
    fn test_get_split() {
        let data = [1u8, 2, 3];
        assert_eq!(get_split::<2>(&data), Some(([1, 2], &data[2..])));
        assert_eq!(get_split::<4>(&data), None);
    }
}
