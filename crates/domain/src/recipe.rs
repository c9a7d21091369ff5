use derive_more::{Deref, Display};

use crate::{
    CreateError, DeleteError, FoodCatalog, FoodItem, FoodItemError, FoodProduct, Macros,
    MembershipID, Name, Quantity, ReadError, UpdateError, ValidationError, id::entity_id,
};

#[allow(async_fn_in_trait)]
pub trait RecipeService {
    async fn get_recipes(&self) -> Result<Vec<Recipe>, ReadError>;
    async fn save_recipe(&self, recipe: Recipe) -> Result<Recipe, CreateError>;
    async fn delete_recipe(&self, id: RecipeID) -> Result<RecipeID, DeleteError>;

    fn validate_servings(&self, servings: &str) -> Result<Servings, ValidationError> {
        match servings.trim().parse::<u32>() {
            Ok(value) => Servings::new(value).map_err(|err| ValidationError::Other(err.into())),
            Err(_) => Err(ValidationError::Other(
                "Servings must be a positive whole number".into(),
            )),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait RecipeRepository {
    async fn read_recipes(&self) -> Result<Vec<Recipe>, ReadError>;
    async fn create_recipe(&self, recipe: Recipe) -> Result<Recipe, CreateError>;
    async fn replace_recipe(&self, recipe: Recipe) -> Result<Recipe, UpdateError>;
    async fn delete_recipe(&self, id: RecipeID) -> Result<RecipeID, DeleteError>;
}

entity_id!(RecipeID);

#[derive(Deref, Display, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Servings(u32);

impl Servings {
    pub fn new(value: u32) -> Result<Self, ServingsError> {
        if value == 0 {
            return Err(ServingsError::Zero);
        }
        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ServingsError {
    #[error("Servings must be 1 or greater")]
    Zero,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeID,
    pub name: Name,
    pub description: String,
    pub servings: Servings,
    pub membership_id: Option<MembershipID>,
    pub ingredients: Vec<FoodItem>,
}

impl Recipe {
    #[must_use]
    pub fn new(name: Name, servings: Servings) -> Self {
        Self {
            id: RecipeID::nil(),
            name,
            description: String::new(),
            servings,
            membership_id: None,
            ingredients: vec![],
        }
    }

    pub fn add_ingredient(&mut self, product: &FoodProduct, quantity: Quantity) {
        self.ingredients.push(FoodItem::new(product, quantity));
    }

    pub fn update_ingredient_quantity(
        &mut self,
        index: usize,
        quantity: Quantity,
        catalog: &FoodCatalog,
    ) -> Result<(), IngredientError> {
        self.ingredients
            .get_mut(index)
            .ok_or(IngredientError::IndexOutOfRange(index))?
            .set_quantity(catalog, quantity)
            .map_err(IngredientError::from)
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Option<FoodItem> {
        (index < self.ingredients.len()).then(|| self.ingredients.remove(index))
    }

    #[must_use]
    pub fn totals(&self) -> Macros {
        self.ingredients.iter().map(|i| i.macros).sum()
    }

    #[must_use]
    pub fn per_serving(&self) -> Macros {
        self.totals().per(*self.servings)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum IngredientError {
    #[error("No ingredient at position {0}")]
    IndexOutOfRange(usize),
    #[error(transparent)]
    Product(#[from] FoodItemError),
}
