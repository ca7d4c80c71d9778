use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt::{self, Formatter};
use std::marker::PhantomData;

use crate::{Comparer, SegmentedHashMap};

struct MapVisitor<K, V, C> {
    _marker: PhantomData<SegmentedHashMap<K, V, C>>,
}

impl<K, V, C> Serialize for SegmentedHashMap<K, V, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de, K, V, C> Deserialize<'de> for SegmentedHashMap<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparer<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor::new())
    }
}

impl<K, V, C> MapVisitor<K, V, C> {
    fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<'de, K, V, C> Visitor<'de> for MapVisitor<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparer<K> + Default,
{
    type Value = SegmentedHashMap<K, V, C>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut values = match access.size_hint() {
            Some(size) => SegmentedHashMap::with_capacity_and_comparer(size, C::default()),
            None => SegmentedHashMap::with_comparer(C::default()),
        };

        while let Some((key, value)) = access.next_entry()? {
            values.insert(key, value);
        }

        Ok(values)
    }
}

#[cfg(test)]
mod test {
    use crate::SegmentedHashMap;

    #[test]
    fn test_map_round_trip() {
        let mut map: SegmentedHashMap<String, u32> = SegmentedHashMap::new();
        map.insert("a".to_string(), 4);
        map.insert("b".to_string(), 3);
        map.insert("c".to_string(), 2);
        map.remove(&"b".to_string());

        let serialized = serde_json::to_string(&map).unwrap();
        let deserialized: SegmentedHashMap<String, u32> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(map, deserialized);
    }

    #[test]
    fn test_empty_map() {
        let map: SegmentedHashMap<String, u32> = SegmentedHashMap::new();
        let serialized = serde_json::to_string(&map).unwrap();
        let deserialized: SegmentedHashMap<String, u32> =
            serde_json::from_str(&serialized).unwrap();
        assert!(deserialized.is_empty());
    }
}
