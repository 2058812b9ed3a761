// [libs/core/hitag2-cipher/src/key.rs]
/*!
 * APARATO: IDENTITY NEWTYPES (KEY, UID, IV)
 * RESPONSABILIDAD: EVITAR LA TRANSPOSICIÓN DE ENTEROS DESNUDOS EN LAS
 *                   FIRMAS PÚBLICAS DEL CIFRADOR
 *
 * Siguiendo la convención del motor matemático hermano (`SafePrivateKey`,
 * `Scalar`): un entero sin tipo que representa una llave, un UID y un
 * IV son tres cosas muy distintas aunque cada uno quepa en 32-48 bits;
 * envolverlos evita errores de orden de argumento en tiempo de
 * compilación.
 */

use thiserror::Error;

use crate::constants::STATE_MASK;

/// Clave secreta de 48 bits de HiTag2.
///
/// La forma externa canónica son 12 caracteres hexadecimales en orden
/// big-endian; el byte `b7..b0` de cada carácter se inyecta LSB-primero
/// en el estado del cifrador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(u64);

/// Error al interpretar una cadena hexadecimal como `Key`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyParseError {
    /// La cadena no tiene exactamente 12 caracteres hexadecimales.
    #[error("la clave debe tener exactamente 12 caracteres hex, se recibieron {0}")]
    WrongLength(usize),
    /// La cadena contiene caracteres que no son dígitos hexadecimales.
    #[error("dígito hexadecimal inválido en la clave: {0}")]
    InvalidDigit(#[from] hex::FromHexError),
}

impl Key {
    /// Construye una clave a partir de su valor entero de 48 bits,
    /// recortando cualquier bit por encima de la posición 47.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(value & STATE_MASK)
    }

    /// Construye una clave a partir de 6 bytes en orden big-endian
    /// (el byte 0 es el más significativo), como en `key=MIKRON` ->
    /// bytes `4D 49 4B 52 4F 4E`.
    #[must_use]
    pub fn from_be_bytes(bytes: [u8; 6]) -> Self {
        let mut value: u64 = 0;
        for b in bytes {
            value = (value << 8) | u64::from(b);
        }
        Self::from_u64(value)
    }

    /// Parsea la representación canónica de 12 caracteres hexadecimales.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyParseError> {
        if hex_str.len() != 12 {
            return Err(KeyParseError::WrongLength(hex_str.len()));
        }
        let mut bytes = [0u8; 6];
        hex::decode_to_slice(hex_str, &mut bytes)?;
        Ok(Self::from_be_bytes(bytes))
    }

    /// Representación canónica de 12 caracteres hexadecimales, en minúsculas.
    #[must_use]
    pub fn to_hex(self) -> String {
        hex::encode(&self.0.to_be_bytes()[2..])
    }

    /// Valor entero de 48 bits subyacente.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Identificador de 32 bits de la etiqueta (constante durante toda la corrida).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid {
    /// Valor entero de 32 bits del identificador.
    pub value: u32,
}

/// Valor de inicialización (nonce) de 32 bits, uno por observación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Iv {
    /// Valor entero de 32 bits del nonce.
    pub value: u32,
}

impl Uid {
    /// Envuelve un entero de 32 bits como `Uid`.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl Iv {
    /// Envuelve un entero de 32 bits como `Iv`.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let key = Key::from_u64(0x4F4E4D494B52);
        assert_eq!(key.to_hex(), "4f4e4d494b52");
        assert_eq!(Key::from_hex("4f4e4d494b52").unwrap(), key);
    }

    #[test]
    fn mikron_bytes_match_ascii() {
        // key=MIKRON (ASCII) -> bytes 4D 49 4B 52 4F 4E.
        let key = Key::from_be_bytes(*b"MIKRON");
        assert_eq!(key.to_hex(), "4d494b524f4e");
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(Key::from_hex("abc").unwrap_err(), KeyParseError::WrongLength(3));
    }

    #[test]
    fn from_u64_clamps_high_bits() {
        let key = Key::from_u64(u64::MAX);
        assert_eq!(key.value(), STATE_MASK);
    }

    proptest::proptest! {
        #[test]
        fn hex_round_trip_holds_for_any_48_bit_value(raw in 0u64..=STATE_MASK) {
            let key = Key::from_u64(raw);
            let parsed = Key::from_hex(&key.to_hex()).unwrap();
            proptest::prop_assert_eq!(key, parsed);
        }
    }
}
