//! # ID 採番
//!
//! アルバム・楽曲の ID に使うランダムな文字列を生成する。
//!
//! URL セーフな 64 文字のアルファベットから 16 文字を選ぶ。
//! 組み合わせは 64^16 = 2^96 通りあり、衝突は実運用上起こらない。

use rand::Rng;

/// ID に使用する文字集合（URL セーフ）
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// ランダム部分の文字数
pub const ID_SUFFIX_LENGTH: usize = 16;

/// ランダムな ID 文字列を生成する
pub fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..ID_SUFFIX_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_suffixは16文字を返す() {
        assert_eq!(random_suffix().chars().count(), ID_SUFFIX_LENGTH);
    }

    #[test]
    fn test_random_suffixはurlセーフな文字のみを含む() {
        let suffix = random_suffix();
        assert!(suffix.bytes().all(|b| ALPHABET.contains(&b)), "{suffix}");
    }
}
