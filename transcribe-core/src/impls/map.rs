//! `HashMap<K, V>` and `BTreeMap<K, V>`.

use core::hash::Hash;
use std::collections::{BTreeMap, HashMap};

use crate::{Def, Map, MapDef, Reflect, ReflectMut, ReflectRef, Shape, Typed, shape_of};

macro_rules! impl_reflect_for_map {
    ($map:ident, $identifier:literal, $($bound:ident),+) => {
        impl<K, V> Map for $map<K, V>
        where
            K: Typed $(+ $bound)+,
            V: Typed,
        {
            fn len(&self) -> usize {
                $map::len(self)
            }

            fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(self.iter().map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)))
            }

            fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
                let key = key.downcast_ref::<K>()?;
                $map::get(self, key).map(|v| v as &dyn Reflect)
            }

            fn insert_boxed(&mut self, key: Box<dyn Reflect>, value: Box<dyn Reflect>) -> bool {
                let (Ok(key), Ok(value)) = (key.into_any().downcast::<K>(), value.into_any().downcast::<V>()) else {
                    return false;
                };
                self.insert(*key, *value);
                true
            }

            fn clear(&mut self) {
                $map::clear(self)
            }
        }

        impl<K, V> Reflect for $map<K, V>
        where
            K: Typed $(+ $bound)+,
            V: Typed,
        {
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }

            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Map(self)
            }
        }

        impl<K, V> Typed for $map<K, V>
        where
            K: Typed $(+ $bound)+,
            V: Typed,
        {
            const SHAPE: &'static Shape = &const {
                Shape::of::<$map<K, V>>(
                    $identifier,
                    Def::Map(MapDef {
                        k: shape_of::<K>,
                        v: shape_of::<V>,
                    }),
                )
            };

            fn zero() -> Self {
                $map::new()
            }
        }
    };
}

impl_reflect_for_map!(HashMap, "HashMap", Eq, Hash);
impl_reflect_for_map!(BTreeMap, "BTreeMap", Ord);
