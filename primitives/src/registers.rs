//! Positional register layout of a campaign record.
//!
//! A campaign record keeps its parameters in six registers (R4 to R9), each
//! holding one fixed-width field, big-endian:
//!
//!   R4: i32              block limit
//!   R5: i64              minimum sold threshold
//!   R6: [i64; 3]         counters (sold, refunded, exchanged)
//!   R7: i64 | [i64; 2]   exchange rate, or (exchange rate, designated asset
//!                        id length) for designated asset campaigns
//!   R8: bytes            owner details, varint length prefixed
//!   R9: bytes            project metadata, varint length prefixed
//!
//! The concatenation of R4..R9 in order is the record's wire layout.

use {
  crate::encoding::HexBytes,
  serde::{Deserialize, Deserializer, Serialize, Serializer},
  std::collections::BTreeMap,
  thiserror::Error,
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RegisterId {
  R4,
  R5,
  R6,
  R7,
  R8,
  R9,
}

impl RegisterId {
  pub const ALL: [RegisterId; 6] = [
    RegisterId::R4,
    RegisterId::R5,
    RegisterId::R6,
    RegisterId::R7,
    RegisterId::R8,
    RegisterId::R9,
  ];
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Register {0:?} is missing")]
  Missing(RegisterId),

  #[error("Register {0:?} has invalid length {1}")]
  InvalidLength(RegisterId, usize),

  #[error("Register {0:?} has a malformed length prefix")]
  MalformedPrefix(RegisterId),

  #[error("{0} unexpected trailing bytes after the record layout")]
  TrailingBytes(usize),
}

/// Raw register contents of an output box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers(BTreeMap<RegisterId, Vec<u8>>);

impl Serialize for Registers {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
      self.0.iter().map(|(id, bytes)| (id, HexBytes(bytes.clone()))),
    )
  }
}

impl<'de> Deserialize<'de> for Registers {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = BTreeMap::<RegisterId, HexBytes>::deserialize(deserializer)?;
    Ok(Self(raw.into_iter().map(|(id, bytes)| (id, bytes.0)).collect()))
  }
}

impl Registers {
  pub fn get(&self, id: RegisterId) -> Option<&[u8]> {
    self.0.get(&id).map(|v| v.as_slice())
  }

  pub fn set(&mut self, id: RegisterId, bytes: Vec<u8>) -> Option<Vec<u8>> {
    self.0.insert(id, bytes)
  }

  pub fn remove(&mut self, id: RegisterId) -> Option<Vec<u8>> {
    self.0.remove(&id)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Counters that only ever grow over the lifetime of a campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
  pub sold: i64,
  pub refunded: i64,
  pub exchanged: i64,
}

impl Counters {
  pub fn new(sold: i64, refunded: i64, exchanged: i64) -> Self {
    Self {
      sold,
      refunded,
      exchanged,
    }
  }
}

/// Shape of the R7 pricing register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingShape {
  /// A single exchange rate.
  Single,
  /// Exchange rate followed by the designated asset id length.
  WithAsset,
}

impl PricingShape {
  fn width(&self) -> usize {
    match self {
      PricingShape::Single => 8,
      PricingShape::WithAsset => 16,
    }
  }
}

/// Settlement asset units per participation unit, optionally with the
/// length of the designated asset id (zero for the native asset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pricing {
  Rate(i64),
  RateWithAsset { rate: i64, asset_id_len: i64 },
}

impl Pricing {
  pub fn rate(&self) -> i64 {
    match self {
      Pricing::Rate(rate) => *rate,
      Pricing::RateWithAsset { rate, .. } => *rate,
    }
  }

  pub fn shape(&self) -> PricingShape {
    match self {
      Pricing::Rate(_) => PricingShape::Single,
      Pricing::RateWithAsset { .. } => PricingShape::WithAsset,
    }
  }
}

/// Typed contents of the R4..R9 registers of a campaign record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRegisters {
  pub block_limit: i32,
  pub minimum_threshold: i64,
  pub counters: Counters,
  pub pricing: Pricing,
  pub owner_details: Vec<u8>,
  pub project_metadata: Vec<u8>,
}

impl CampaignRegisters {
  /// Encodes every field into its own register.
  pub fn to_registers(&self) -> Registers {
    let mut registers = Registers::default();
    for id in RegisterId::ALL {
      let mut bytes = Vec::new();
      self.encode_field(id, &mut bytes);
      registers.set(id, bytes);
    }
    registers
  }

  /// Decodes the typed fields from raw registers.
  ///
  /// Every register must be present and hold exactly one well formed field.
  /// The shape of the pricing field is taken from the width of R7.
  pub fn from_registers(registers: &Registers) -> Result<Self, Error> {
    let field = |id| Reader::register(registers, id);

    let pricing_shape = match field(RegisterId::R7)?.bytes.len() {
      8 => PricingShape::Single,
      16 => PricingShape::WithAsset,
      len => return Err(Error::InvalidLength(RegisterId::R7, len)),
    };

    let mut r4 = field(RegisterId::R4)?;
    let mut r5 = field(RegisterId::R5)?;
    let mut r6 = field(RegisterId::R6)?;
    let mut r7 = field(RegisterId::R7)?;
    let mut r8 = field(RegisterId::R8)?;
    let mut r9 = field(RegisterId::R9)?;

    let decoded = Self {
      block_limit: r4.block_limit()?,
      minimum_threshold: r5.long()?,
      counters: r6.counters()?,
      pricing: r7.pricing(pricing_shape)?,
      owner_details: r8.blob()?,
      project_metadata: r9.blob()?,
    };

    for reader in [r4, r5, r6, r7, r8, r9] {
      reader.finish()?;
    }

    Ok(decoded)
  }

  /// The record wire layout: all fields concatenated in register order.
  pub fn to_bytes(&self) -> Vec<u8> {
    let mut bytes = Vec::new();
    for id in RegisterId::ALL {
      self.encode_field(id, &mut bytes);
    }
    bytes
  }

  /// Parses the concatenated wire layout. The pricing shape must be known
  /// up front because the layout carries no field boundaries.
  pub fn from_bytes(bytes: &[u8], pricing: PricingShape) -> Result<Self, Error> {
    let mut reader = Reader {
      bytes,
      register: RegisterId::R4,
    };

    let block_limit = reader.at(RegisterId::R4).block_limit()?;
    let minimum_threshold = reader.at(RegisterId::R5).long()?;
    let counters = reader.at(RegisterId::R6).counters()?;
    let pricing = reader.at(RegisterId::R7).pricing(pricing)?;
    let owner_details = reader.at(RegisterId::R8).blob()?;
    let project_metadata = reader.at(RegisterId::R9).blob()?;
    reader.finish()?;

    Ok(Self {
      block_limit,
      minimum_threshold,
      counters,
      pricing,
      owner_details,
      project_metadata,
    })
  }

  fn encode_field(&self, id: RegisterId, out: &mut Vec<u8>) {
    match id {
      RegisterId::R4 => out.extend_from_slice(&self.block_limit.to_be_bytes()),
      RegisterId::R5 => {
        out.extend_from_slice(&self.minimum_threshold.to_be_bytes())
      }
      RegisterId::R6 => {
        out.extend_from_slice(&self.counters.sold.to_be_bytes());
        out.extend_from_slice(&self.counters.refunded.to_be_bytes());
        out.extend_from_slice(&self.counters.exchanged.to_be_bytes());
      }
      RegisterId::R7 => match self.pricing {
        Pricing::Rate(rate) => out.extend_from_slice(&rate.to_be_bytes()),
        Pricing::RateWithAsset { rate, asset_id_len } => {
          out.extend_from_slice(&rate.to_be_bytes());
          out.extend_from_slice(&asset_id_len.to_be_bytes());
        }
      },
      RegisterId::R8 => encode_blob(&self.owner_details, out),
      RegisterId::R9 => encode_blob(&self.project_metadata, out),
    }
  }
}

fn encode_blob(blob: &[u8], out: &mut Vec<u8>) {
  let mut buf = unsigned_varint::encode::usize_buffer();
  out.extend_from_slice(unsigned_varint::encode::usize(blob.len(), &mut buf));
  out.extend_from_slice(blob);
}

/// Cursor over register bytes that attributes decoding errors to the
/// register being read.
struct Reader<'a> {
  bytes: &'a [u8],
  register: RegisterId,
}

impl<'a> Reader<'a> {
  fn register(registers: &'a Registers, id: RegisterId) -> Result<Self, Error> {
    registers
      .get(id)
      .map(|bytes| Reader { bytes, register: id })
      .ok_or(Error::Missing(id))
  }

  fn at(&mut self, register: RegisterId) -> &mut Self {
    self.register = register;
    self
  }

  fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
    if self.bytes.len() < N {
      return Err(Error::InvalidLength(self.register, self.bytes.len()));
    }
    let (head, tail) = self.bytes.split_at(N);
    self.bytes = tail;
    let mut out = [0u8; N];
    out.copy_from_slice(head);
    Ok(out)
  }

  fn block_limit(&mut self) -> Result<i32, Error> {
    Ok(i32::from_be_bytes(self.take()?))
  }

  fn long(&mut self) -> Result<i64, Error> {
    Ok(i64::from_be_bytes(self.take()?))
  }

  fn counters(&mut self) -> Result<Counters, Error> {
    Ok(Counters {
      sold: self.long()?,
      refunded: self.long()?,
      exchanged: self.long()?,
    })
  }

  fn pricing(&mut self, shape: PricingShape) -> Result<Pricing, Error> {
    if self.bytes.len() < shape.width() {
      return Err(Error::InvalidLength(self.register, self.bytes.len()));
    }
    Ok(match shape {
      PricingShape::Single => Pricing::Rate(self.long()?),
      PricingShape::WithAsset => Pricing::RateWithAsset {
        rate: self.long()?,
        asset_id_len: self.long()?,
      },
    })
  }

  fn blob(&mut self) -> Result<Vec<u8>, Error> {
    let (len, rest) = unsigned_varint::decode::usize(self.bytes)
      .map_err(|_| Error::MalformedPrefix(self.register))?;
    if rest.len() < len {
      return Err(Error::InvalidLength(self.register, rest.len()));
    }
    let (blob, tail) = rest.split_at(len);
    self.bytes = tail;
    Ok(blob.to_vec())
  }

  fn finish(self) -> Result<(), Error> {
    match self.bytes.len() {
      0 => Ok(()),
      n => Err(Error::TrailingBytes(n)),
    }
  }
}
