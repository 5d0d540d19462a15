//! 16비트 합산 체크섬
//!
//! CRC가 아닌 단순 바이트 합 (mod 65536). 워치 펌웨어가 같은 방식으로 검증함

/// 바이트 합의 하위 16비트
pub fn checksum(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)))
}

/// 와이어 순서(little-endian)의 체크섬
pub fn checksum_le(bytes: &[u8]) -> [u8; 2] {
    checksum(bytes).to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::Rng;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(checksum(b""), 0);
    }

    #[test]
    fn test_simple_sum() {
        assert_eq!(checksum(b"abc"), 294);
        assert_eq!(checksum_le(b"abc"), [0x26, 0x01]);
    }

    #[test]
    fn test_wraparound() {
        // 0xFF * 258 = 65790 = 65536 + 254
        let data = vec![0xFFu8; 258];
        assert_eq!(checksum(&data), 254);

        // 정확히 65536이 되면 0
        let mut data = vec![0xFFu8; 257];
        data.push(1);
        assert_eq!(checksum(&data), 0);
    }

    #[test]
    fn test_order_independent() {
        let mut rng = rand::thread_rng();
        let mut data: Vec<u8> = (0..4096).map(|_| rng.gen()).collect();
        let expected = checksum(&data);

        for _ in 0..8 {
            data.shuffle(&mut rng);
            assert_eq!(checksum(&data), expected);
        }
    }
}
