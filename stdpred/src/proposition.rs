use bene_primitives::{SigmaProp, TRIVIAL_HEADER};

/// Script length above which the varint size field of a sized script takes
/// two bytes instead of one.
const SHORT_SCRIPT_MAX: usize = 127;

/// Checks whether a guarding script encodes the given authorization
/// condition, i.e. "the box with this script belongs to that owner".
///
/// A script that starts with the trivial header is compared byte for byte
/// against the condition. Any other script is assumed to be a sized script:
/// its header and size field (2 bytes up to 127 bytes of script, 3 bytes
/// above) are stripped and the rest is compared against the condition bytes
/// without their leading header byte.
///
/// The cutoff looks at the total script length rather than the body length,
/// so scripts of 128 or 129 bytes with a one byte size field never match.
pub fn sigma_prop_equals_script(prop: &SigmaProp, script: &[u8]) -> bool {
  match script.first() {
    None => false,
    Some(&TRIVIAL_HEADER) => prop.prop_bytes() == script,
    Some(_) => {
      let offset = if script.len() > SHORT_SCRIPT_MAX { 3 } else { 2 };
      match (prop.prop_bytes().get(1..), script.get(offset..)) {
        (Some(expected), Some(body)) => expected == body,
        _ => false,
      }
    }
  }
}
