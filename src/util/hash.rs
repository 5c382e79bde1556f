use sha2::{Digest, Sha256};

pub fn sha256_hex(bytes: &[u8]) -> String {
  hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
  use super::sha256_hex;

  #[test]
  fn hashes_empty_input() {
    assert_eq!(
      sha256_hex(b""),
      "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
  }
}
