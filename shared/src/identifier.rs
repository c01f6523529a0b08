use crate::types::ActorId;

/// Largest prime below 2^16
const MOD_ADLER: u32 = 65521;
/// Largest block that can be summed before `s1` risks overflowing a u32
const BLOCK_SIZE: usize = 5552;

/// Sentinel for "no actor"
pub const INVALID_ACTOR_ID: ActorId = 0;

/// Hashes a name into a 32-bit identifier.
///
/// The name is lower-cased first so lookups are case-insensitive. UTF-16 code
/// units are summed in blocks, reducing modulo 65521 after each block, and the
/// 16-bit result is replicated into both halves of the id.
///
/// Different names can collide. Ids are practical keys, not unique ones.
pub fn hash_name(name: &str) -> u32 {
    let units: Vec<u16> = name.to_lowercase().encode_utf16().collect();

    let mut s1: u32 = 0;
    for block in units.chunks(BLOCK_SIZE) {
        for unit in block {
            s1 += u32::from(*unit);
        }
        s1 %= MOD_ADLER;
    }

    (s1 << 16) | s1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_hashes_to_zero() {
        assert_eq!(hash_name(""), 0);
    }

    #[test]
    fn known_values() {
        // "a" = 97
        assert_eq!(hash_name("a"), (97 << 16) | 97);
        assert_eq!(hash_name("TransformComponent"), 128911279);
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(hash_name("ScriptComponent"), hash_name("scriptcomponent"));
        assert_eq!(hash_name("SCRIPTCOMPONENT"), hash_name("scriptComponent"));
    }

    #[test]
    fn long_names_reduce_per_block() {
        let name = "z".repeat(BLOCK_SIZE * 3 + 17);
        let id = hash_name(&name);
        assert_eq!(id >> 16, id & 0xFFFF);
        assert!((id & 0xFFFF) < MOD_ADLER);
    }
}
