use std::{
    collections::{BTreeMap, BTreeSet},
    iter::Sum,
    ops::{Add, AddAssign},
};

use derive_more::{Deref, Display};

use crate::{Name, ReadError, id::entity_id};

#[allow(async_fn_in_trait)]
pub trait FoodProductService {
    async fn get_food_products(
        &self,
        page: u32,
        search: Option<String>,
    ) -> Result<FoodProductPage, ReadError>;
    async fn get_food_catalog(&self) -> Result<FoodCatalog, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait FoodProductRepository {
    async fn read_food_products(
        &self,
        page: u32,
        search: Option<String>,
    ) -> Result<FoodProductPage, ReadError>;
}

entity_id!(FoodProductID);

#[derive(Debug, Clone, PartialEq)]
pub struct FoodProduct {
    pub id: FoodProductID,
    pub name: Name,
    pub category: Option<String>,
    /// Nutritional values per 100 g.
    pub per_100: Macros,
}

impl FoodProduct {
    #[must_use]
    pub fn macros_for(&self, quantity: Quantity) -> Macros {
        self.per_100.scaled(quantity.ratio())
    }
}

/// One page of the product catalog as served by the admin API.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodProductPage {
    pub products: Vec<FoodProduct>,
    pub categories: Vec<String>,
    pub pages: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Macros {
    pub calories: f32,
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
}

impl Macros {
    pub const ZERO: Macros = Macros {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    #[must_use]
    pub fn scaled(&self, ratio: f32) -> Self {
        Self {
            calories: self.calories * ratio,
            protein: self.protein * ratio,
            carbs: self.carbs * ratio,
            fat: self.fat * ratio,
        }
    }

    /// Divides all values by `divisor`. A zero divisor yields zero.
    #[must_use]
    pub fn per(&self, divisor: u32) -> Self {
        if divisor == 0 {
            return Self::ZERO;
        }
        #[allow(clippy::cast_precision_loss)]
        self.scaled(1.0 / divisor as f32)
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Macros::ZERO, Add::add)
    }
}

/// Amount of a food product in grams.
#[derive(Deref, Display, Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Quantity(f32);

impl Quantity {
    pub fn new(value: f32) -> Result<Self, QuantityError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(QuantityError::NotPositive);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn ratio(self) -> f32 {
        self.0 / 100.0
    }
}

impl TryFrom<&str> for Quantity {
    type Error = QuantityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().replace(',', ".").parse::<f32>() {
            Ok(parsed_value) => Quantity::new(parsed_value),
            Err(_) => Err(QuantityError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Quantity must be greater than 0")]
    NotPositive,
    #[error("Quantity must be a number")]
    ParseError,
}

/// A food product in a given quantity together with the macros derived from it.
///
/// Used for meal items as well as for recipe ingredients.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub food_product_id: FoodProductID,
    pub quantity: Quantity,
    pub macros: Macros,
}

impl FoodItem {
    #[must_use]
    pub fn new(product: &FoodProduct, quantity: Quantity) -> Self {
        Self {
            food_product_id: product.id,
            quantity,
            macros: product.macros_for(quantity),
        }
    }

    /// Changes the quantity and recomputes the macros from the current product data.
    ///
    /// The item is left untouched if the product is missing from the catalog.
    pub fn set_quantity(
        &mut self,
        catalog: &FoodCatalog,
        quantity: Quantity,
    ) -> Result<(), FoodItemError> {
        let product = catalog
            .lookup(self.food_product_id)
            .ok_or(FoodItemError::ProductNotFound(self.food_product_id))?;
        self.quantity = quantity;
        self.macros = product.macros_for(quantity);
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FoodItemError {
    #[error("Food product {0} not found")]
    ProductNotFound(FoodProductID),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FoodCatalog {
    products: BTreeMap<FoodProductID, FoodProduct>,
}

impl FoodCatalog {
    #[must_use]
    pub fn new(products: Vec<FoodProduct>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    #[must_use]
    pub fn lookup(&self, id: FoodProductID) -> Option<&FoodProduct> {
        self.products.get(&id)
    }

    pub fn extend(&mut self, products: impl IntoIterator<Item = FoodProduct>) {
        self.products.extend(products.into_iter().map(|p| (p.id, p)));
    }

    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&FoodProduct> {
        let term = term.trim().to_lowercase();
        let mut result = self
            .products
            .values()
            .filter(|p| p.name.as_ref().to_lowercase().contains(&term))
            .collect::<Vec<_>>();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        result
    }

    #[must_use]
    pub fn categories(&self) -> BTreeSet<&str> {
        self.products
            .values()
            .filter_map(|p| p.category.as_deref())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    static PRODUCT: std::sync::LazyLock<FoodProduct> = std::sync::LazyLock::new(|| FoodProduct {
        id: 1.into(),
        name: Name::new("Avižos").unwrap(),
        category: Some(String::from("Grūdai")),
        per_100: Macros {
            calories: 389.0,
            protein: 16.9,
            carbs: 66.3,
            fat: 6.9,
        },
    });

    static PRODUCT_2: std::sync::LazyLock<FoodProduct> =
        std::sync::LazyLock::new(|| FoodProduct {
            id: 2.into(),
            name: Name::new("Bananas").unwrap(),
            category: Some(String::from("Vaisiai")),
            per_100: Macros {
                calories: 89.0,
                protein: 1.1,
                carbs: 22.8,
                fat: 0.3,
            },
        });

    #[rstest]
    #[case(150.0, Ok(Quantity(150.0)))]
    #[case(0.5, Ok(Quantity(0.5)))]
    #[case(0.0, Err(QuantityError::NotPositive))]
    #[case(-10.0, Err(QuantityError::NotPositive))]
    #[case(f32::NAN, Err(QuantityError::NotPositive))]
    fn test_quantity_new(#[case] value: f32, #[case] expected: Result<Quantity, QuantityError>) {
        assert_eq!(Quantity::new(value), expected);
    }

    #[rstest]
    #[case("150", Ok(Quantity(150.0)))]
    #[case(" 12,5 ", Ok(Quantity(12.5)))]
    #[case("0", Err(QuantityError::NotPositive))]
    #[case("abc", Err(QuantityError::ParseError))]
    #[case("", Err(QuantityError::ParseError))]
    fn test_quantity_try_from_str(
        #[case] value: &str,
        #[case] expected: Result<Quantity, QuantityError>,
    ) {
        assert_eq!(Quantity::try_from(value), expected);
    }

    #[test]
    fn test_macros_sum() {
        let macros = [PRODUCT.per_100, PRODUCT_2.per_100];
        let sum = macros.into_iter().sum::<Macros>();
        assert_approx_eq!(sum.calories, 478.0, 0.001);
        assert_approx_eq!(sum.protein, 18.0, 0.001);
        assert_approx_eq!(sum.carbs, 89.1, 0.001);
        assert_approx_eq!(sum.fat, 7.2, 0.001);
        assert_eq!(std::iter::empty::<Macros>().sum::<Macros>(), Macros::ZERO);
    }

    #[test]
    fn test_macros_per() {
        let macros = Macros {
            calories: 800.0,
            protein: 40.0,
            carbs: 100.0,
            fat: 20.0,
        };
        assert_eq!(
            macros.per(4),
            Macros {
                calories: 200.0,
                protein: 10.0,
                carbs: 25.0,
                fat: 5.0,
            }
        );
        assert_eq!(macros.per(0), Macros::ZERO);
    }

    #[rstest]
    #[case(100.0)]
    #[case(150.0)]
    #[case(37.5)]
    #[case(1000.0)]
    fn test_food_item_new(#[case] grams: f32) {
        let item = FoodItem::new(&PRODUCT, Quantity::new(grams).unwrap());
        assert_eq!(item.food_product_id, PRODUCT.id);
        assert_approx_eq!(
            item.macros.calories,
            PRODUCT.per_100.calories * grams / 100.0,
            0.01
        );
        assert_approx_eq!(
            item.macros.protein,
            PRODUCT.per_100.protein * grams / 100.0,
            0.01
        );
        assert_approx_eq!(
            item.macros.carbs,
            PRODUCT.per_100.carbs * grams / 100.0,
            0.01
        );
        assert_approx_eq!(
            item.macros.fat,
            PRODUCT.per_100.fat * grams / 100.0,
            0.01
        );
    }

    #[test]
    fn test_food_item_set_quantity() {
        let catalog = FoodCatalog::new(vec![PRODUCT.clone()]);
        let mut item = FoodItem::new(&PRODUCT, Quantity::new(100.0).unwrap());
        assert_eq!(
            item.set_quantity(&catalog, Quantity::new(50.0).unwrap()),
            Ok(())
        );
        assert_eq!(item.quantity, Quantity(50.0));
        assert_approx_eq!(item.macros.calories, 194.5, 0.001);
        assert_approx_eq!(item.macros.fat, 3.45, 0.001);
    }

    #[test]
    fn test_food_item_set_quantity_product_not_found() {
        let catalog = FoodCatalog::new(vec![PRODUCT_2.clone()]);
        let mut item = FoodItem::new(&PRODUCT, Quantity::new(100.0).unwrap());
        let expected = item.clone();
        assert_eq!(
            item.set_quantity(&catalog, Quantity::new(50.0).unwrap()),
            Err(FoodItemError::ProductNotFound(PRODUCT.id))
        );
        assert_eq!(item, expected);
    }

    #[test]
    fn test_food_catalog_lookup() {
        let catalog = FoodCatalog::new(vec![PRODUCT.clone(), PRODUCT_2.clone()]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup(2.into()), Some(&*PRODUCT_2));
        assert_eq!(catalog.lookup(3.into()), None);
    }

    #[test]
    fn test_food_catalog_search() {
        let catalog = FoodCatalog::new(vec![PRODUCT_2.clone(), PRODUCT.clone()]);
        assert_eq!(catalog.search("BAN"), vec![&*PRODUCT_2]);
        assert_eq!(catalog.search("a"), vec![&*PRODUCT, &*PRODUCT_2]);
        assert!(catalog.search("pienas").is_empty());
    }

    #[test]
    fn test_food_catalog_categories() {
        let mut catalog = FoodCatalog::default();
        assert!(catalog.is_empty());
        catalog.extend(vec![PRODUCT.clone(), PRODUCT_2.clone()]);
        assert_eq!(
            catalog.categories(),
            BTreeSet::from(["Grūdai", "Vaisiai"])
        );
    }
}
