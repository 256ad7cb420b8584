use crate::Digest32;

pub trait ToBase58String {
  fn to_b58(&self) -> String;
}

impl ToBase58String for Digest32 {
  fn to_b58(&self) -> String {
    bs58::encode(self.as_bytes()).into_string()
  }
}
