//! In-memory fruit store, seeded with a fixed assortment.

use std::collections::BTreeMap;
use std::sync::RwLock;

use rand::seq::IteratorRandom;

use crate::domain::{Fruit, FruitId};
use crate::error::AppError;

pub struct FruitStore {
    fruits: RwLock<BTreeMap<i32, Fruit>>,
}

impl Default for FruitStore {
    fn default() -> Self {
        let seed = [
            ("Banana", 111.0),
            ("Pear", 103.0),
            ("Plum", 17.0),
        ];
        let fruits = seed
            .iter()
            .enumerate()
            .map(|(i, (name, calories))| {
                let id = i as i32 + 1;
                let fruit = Fruit::new(FruitId::new(id).expect("seed id"), (*name).into(), *calories)
                    .expect("seed fruit");
                (id, fruit)
            })
            .collect();
        FruitStore {
            fruits: RwLock::new(fruits),
        }
    }
}

impl FruitStore {
    pub fn get(&self, id: FruitId) -> Result<Fruit, AppError> {
        self.fruits
            .read()
            .expect("fruit store lock poisoned")
            .get(&id.get())
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("fruit {}", id.get())))
    }

    pub fn get_random(&self) -> Option<Fruit> {
        self.fruits
            .read()
            .expect("fruit store lock poisoned")
            .values()
            .choose(&mut rand::thread_rng())
            .cloned()
    }

    pub fn create(&self, fruit: Fruit) -> Result<Fruit, AppError> {
        let mut fruits = self.fruits.write().expect("fruit store lock poisoned");
        let id = fruit.id().get();
        if fruits.contains_key(&id) {
            return Err(AppError::Conflict(format!("fruit {} already exists", id)));
        }
        fruits.insert(id, fruit.clone());
        Ok(fruit)
    }

    pub fn update(&self, fruit: Fruit) -> Result<Fruit, AppError> {
        let mut fruits = self.fruits.write().expect("fruit store lock poisoned");
        let id = fruit.id().get();
        if !fruits.contains_key(&id) {
            return Err(AppError::NotFound(format!("fruit {}", id)));
        }
        fruits.insert(id, fruit.clone());
        Ok(fruit)
    }

    pub fn delete(&self, id: FruitId) -> Result<(), AppError> {
        let mut fruits = self.fruits.write().expect("fruit store lock poisoned");
        if fruits.remove(&id.get()).is_none() {
            return Err(AppError::NotFound(format!("fruit {}", id.get())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit(id: i32, name: &str, calories: f64) -> Fruit {
        Fruit::new(FruitId::new(id).unwrap(), name.into(), calories).unwrap()
    }

    #[test]
    fn store_is_seeded() {
        let store = FruitStore::default();
        assert_eq!(store.get(FruitId::new(1).unwrap()).unwrap().name(), "Banana");
        assert_eq!(store.get(FruitId::new(3).unwrap()).unwrap().name(), "Plum");
    }

    #[test]
    fn random_returns_a_seeded_fruit() {
        let store = FruitStore::default();
        let picked = store.get_random().unwrap();
        assert!(["Banana", "Pear", "Plum"].contains(&picked.name()));
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let store = FruitStore::default();
        let result = store.create(fruit(1, "Apple", 95.0));
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn create_then_get_round_trips() {
        let store = FruitStore::default();
        store.create(fruit(10, "Apple", 95.0)).unwrap();
        assert_eq!(store.get(FruitId::new(10).unwrap()).unwrap().name(), "Apple");
    }

    #[test]
    fn update_missing_fruit_is_not_found() {
        let store = FruitStore::default();
        assert!(matches!(
            store.update(fruit(99, "Quince", 57.0)),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn delete_removes_the_fruit() {
        let store = FruitStore::default();
        store.delete(FruitId::new(2).unwrap()).unwrap();
        assert!(store.get(FruitId::new(2).unwrap()).is_err());
    }
}
