use crate::{DiskDeErr, DiskDeserialize, Endianness};

macro_rules! impl_deserialize {
    ($($t:ty),*) => {
        $(
            impl DiskDeserialize for $t {
                fn deserialize(endianness: Endianness, input: &[u8]) -> Result<(Self, usize), DiskDeErr>
                where
                    Self: Sized,
                {
                    const SIZE: usize = core::mem::size_of::<$t>();
                    if input.len() < SIZE {
                        return Err(DiskDeErr::TruncatedInput {
                            needed: SIZE,
                            available: input.len(),
                        });
                    }
                    let mut bytes = [0u8; SIZE];
                    bytes.copy_from_slice(&input[..SIZE]);
                    let number = match endianness {
                        Endianness::NA | Endianness::Little => <$t>::from_le_bytes(bytes),
                        Endianness::Big => <$t>::from_be_bytes(bytes),
                    };
                    Ok((number, SIZE))
                }
            }
        )*
    };
}

// arrays of const size, every element shares the endianness
macro_rules! impl_deserialize_array {
    ($($t:ty),*) => {
        $(
            impl<const N: usize> DiskDeserialize for [$t; N] {
                fn deserialize(endianness: Endianness, input: &[u8]) -> Result<(Self, usize), DiskDeErr>
                where
                    Self: Sized,
                {
                    const ELEM_SIZE: usize = core::mem::size_of::<$t>();
                    let total_size = ELEM_SIZE * N;

                    if input.len() < total_size {
                        return Err(DiskDeErr::TruncatedInput {
                            needed: total_size,
                            available: input.len(),
                        });
                    }

                    let mut result = [<$t>::default(); N];

                    for (i, slot) in result.iter_mut().enumerate() {
                        let offset = i * ELEM_SIZE;
                        let (elem, _) = <$t>::deserialize(endianness, &input[offset..offset + ELEM_SIZE])?;
                        *slot = elem;
                    }

                    Ok((result, total_size))
                }
            }
        )*
    };
}

impl_deserialize!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl_deserialize_array!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);
