use crate::{Tensor, TensorLike};

use serde::ser::SerializeStruct;
use serde::Deserialize;

impl<T> serde::Serialize for Tensor<T>
where
    T: serde::Serialize + Clone,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Tensor", 2)?;
        state.serialize_field("data", self.as_slice())?;
        state.serialize_field("shape", self.shape())?;
        state.end()
    }
}

impl<'de, T> serde::Deserialize<'de> for Tensor<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct TensorData<T> {
            data: Vec<T>,
            shape: Vec<usize>,
        }

        let TensorData { data, shape } = TensorData::deserialize(deserializer)?;

        Tensor::from_shape_vec(&shape, data).map_err(serde::de::Error::custom)
    }
}
