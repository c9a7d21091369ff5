use std::collections::BTreeSet;

use derive_more::{Deref, Display};

use crate::{
    CreateError, DeleteError, FoodCatalog, FoodItem, FoodItemError, FoodProduct, FoodProductID,
    Macros, MembershipID, Name, Quantity, ReadError, UpdateError, ValidationError,
    id::entity_id,
};

#[allow(async_fn_in_trait)]
pub trait NutritionPlanService {
    async fn get_nutrition_plans(&self) -> Result<Vec<NutritionPlan>, ReadError>;
    async fn get_nutrition_plan(&self, id: NutritionPlanID) -> Result<NutritionPlan, ReadError>;
    async fn save_nutrition_plan(&self, plan: NutritionPlan) -> Result<NutritionPlan, CreateError>;
    async fn delete_nutrition_plan(
        &self,
        id: NutritionPlanID,
    ) -> Result<NutritionPlanID, DeleteError>;

    async fn validate_nutrition_plan_name(
        &self,
        name: &str,
        id: NutritionPlanID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_nutrition_plans().await {
                Ok(plans) => {
                    if plans.iter().all(|p| p.id == id || p.name != name) {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }

    fn validate_quantity(&self, quantity: &str) -> Result<Quantity, ValidationError> {
        Quantity::try_from(quantity).map_err(|err| ValidationError::Other(err.into()))
    }
}

#[allow(async_fn_in_trait)]
pub trait NutritionPlanRepository {
    async fn read_nutrition_plans(&self) -> Result<Vec<NutritionPlan>, ReadError>;
    async fn read_nutrition_plan(&self, id: NutritionPlanID) -> Result<NutritionPlan, ReadError>;
    async fn create_nutrition_plan(
        &self,
        plan: NutritionPlan,
    ) -> Result<NutritionPlan, CreateError>;
    async fn replace_nutrition_plan(
        &self,
        plan: NutritionPlan,
    ) -> Result<NutritionPlan, UpdateError>;
    async fn delete_nutrition_plan(
        &self,
        id: NutritionPlanID,
    ) -> Result<NutritionPlanID, DeleteError>;
}

entity_id!(NutritionPlanID);

#[derive(Debug, Default, Display, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    #[display("male")]
    Male,
    #[display("female")]
    Female,
    #[default]
    #[display("unisex")]
    Unisex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NutritionPlan {
    pub id: NutritionPlanID,
    pub name: Name,
    pub description: String,
    pub gender: Gender,
    pub membership_id: Option<MembershipID>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub is_published: bool,
    pub days: Vec<Day>,
    /// Highest day number handed out so far, also if that day was removed since.
    pub last_day_number: u32,
}

impl NutritionPlan {
    #[must_use]
    pub fn new(name: Name) -> Self {
        Self {
            id: NutritionPlanID::nil(),
            name,
            description: String::new(),
            gender: Gender::default(),
            membership_id: None,
            image_url: None,
            video_url: None,
            is_published: false,
            days: vec![],
            last_day_number: 0,
        }
    }

    /// Appends a day numbered one above the highest day ever added.
    ///
    /// Remaining days are never renumbered and the number of a removed day is not handed out
    /// again, so gaps left by removed days persist.
    pub fn add_day(&mut self) -> Result<DayNumber, PositionError> {
        let highest = self
            .days
            .iter()
            .map(|d| *d.day_number)
            .fold(self.last_day_number, u32::max);
        let day_number = DayNumber(highest.checked_add(1).ok_or(PositionError::Overflow)?);
        self.last_day_number = *day_number;
        self.days.push(Day::new(day_number));
        Ok(day_number)
    }

    pub fn remove_day(&mut self, day_number: DayNumber) -> Option<Day> {
        let index = self.days.iter().position(|d| d.day_number == day_number)?;
        Some(self.days.remove(index))
    }

    #[must_use]
    pub fn day(&self, day_number: DayNumber) -> Option<&Day> {
        self.days.iter().find(|d| d.day_number == day_number)
    }

    pub fn day_mut(&mut self, day_number: DayNumber) -> Option<&mut Day> {
        self.days.iter_mut().find(|d| d.day_number == day_number)
    }

    /// Exchanges the meals of two days. Day numbers stay in place.
    pub fn swap_days(&mut self, a: DayNumber, b: DayNumber) -> bool {
        let (Some(i), Some(j)) = (
            self.days.iter().position(|d| d.day_number == a),
            self.days.iter().position(|d| d.day_number == b),
        ) else {
            return false;
        };
        if i != j {
            let meals = std::mem::take(&mut self.days[i].meals);
            self.days[i].meals = std::mem::replace(&mut self.days[j].meals, meals);
        }
        true
    }

    #[must_use]
    pub fn totals(&self) -> Macros {
        self.days.iter().map(Day::totals).sum()
    }

    #[must_use]
    pub fn average_day_totals(&self) -> Macros {
        self.totals()
            .per(u32::try_from(self.days.len()).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub fn food_products(&self) -> BTreeSet<FoodProductID> {
        self.days
            .iter()
            .flat_map(|d| &d.meals)
            .flat_map(|m| &m.items)
            .map(|i| i.food_product_id)
            .collect()
    }
}

#[derive(Deref, Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayNumber(u32);

impl DayNumber {
    pub fn new(value: u32) -> Result<Self, PositionError> {
        if value == 0 {
            return Err(PositionError::Zero);
        }
        Ok(Self(value))
    }
}

#[derive(Deref, Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MealNumber(u32);

impl MealNumber {
    pub fn new(value: u32) -> Result<Self, PositionError> {
        if value == 0 {
            return Err(PositionError::Zero);
        }
        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PositionError {
    #[error("Number must be 1 or greater")]
    Zero,
    #[error("Number must not exceed {}", u32::MAX)]
    Overflow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub day_number: DayNumber,
    pub meals: Vec<Meal>,
}

impl Day {
    #[must_use]
    pub fn new(day_number: DayNumber) -> Self {
        Self {
            day_number,
            meals: vec![],
        }
    }

    pub fn add_meal(&mut self) -> Result<MealNumber, PositionError> {
        let highest = self.meals.iter().map(|m| *m.meal_number).max().unwrap_or(0);
        let meal_number = MealNumber(highest.checked_add(1).ok_or(PositionError::Overflow)?);
        self.meals.push(Meal::new(meal_number));
        Ok(meal_number)
    }

    pub fn remove_meal(&mut self, meal_number: MealNumber) -> Option<Meal> {
        let index = self
            .meals
            .iter()
            .position(|m| m.meal_number == meal_number)?;
        Some(self.meals.remove(index))
    }

    #[must_use]
    pub fn meal(&self, meal_number: MealNumber) -> Option<&Meal> {
        self.meals.iter().find(|m| m.meal_number == meal_number)
    }

    pub fn meal_mut(&mut self, meal_number: MealNumber) -> Option<&mut Meal> {
        self.meals.iter_mut().find(|m| m.meal_number == meal_number)
    }

    /// Exchanges name and items of two meals. Meal numbers stay in place.
    pub fn swap_meals(&mut self, a: MealNumber, b: MealNumber) -> bool {
        let (Some(i), Some(j)) = (
            self.meals.iter().position(|m| m.meal_number == a),
            self.meals.iter().position(|m| m.meal_number == b),
        ) else {
            return false;
        };
        if i != j {
            let (lo, hi) = (i.min(j), i.max(j));
            let (left, right) = self.meals.split_at_mut(hi);
            std::mem::swap(&mut left[lo].name, &mut right[0].name);
            std::mem::swap(&mut left[lo].items, &mut right[0].items);
        }
        true
    }

    #[must_use]
    pub fn totals(&self) -> Macros {
        self.meals.iter().map(Meal::totals).sum()
    }
}

pub type MealItem = FoodItem;

#[derive(Debug, Clone, PartialEq)]
pub struct Meal {
    pub meal_number: MealNumber,
    pub name: String,
    pub items: Vec<MealItem>,
}

impl Meal {
    #[must_use]
    pub fn new(meal_number: MealNumber) -> Self {
        Self {
            meal_number,
            name: format!("Valgymas {meal_number}"),
            items: vec![],
        }
    }

    pub fn rename(&mut self, name: &str) {
        name.trim().clone_into(&mut self.name);
    }

    pub fn add_food_item(&mut self, product: &FoodProduct, quantity: Quantity) -> &MealItem {
        self.items.push(MealItem::new(product, quantity));
        &self.items[self.items.len() - 1]
    }

    pub fn update_food_item_quantity(
        &mut self,
        index: usize,
        quantity: Quantity,
        catalog: &FoodCatalog,
    ) -> Result<(), MealItemError> {
        self.items
            .get_mut(index)
            .ok_or(MealItemError::IndexOutOfRange(index))?
            .set_quantity(catalog, quantity)
            .map_err(MealItemError::from)
    }

    pub fn remove_food_item(&mut self, index: usize) -> Option<MealItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn move_food_item(&mut self, from: usize, to: usize) -> Result<(), MealItemError> {
        if from >= self.items.len() {
            return Err(MealItemError::IndexOutOfRange(from));
        }
        if to >= self.items.len() {
            return Err(MealItemError::IndexOutOfRange(to));
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }

    #[must_use]
    pub fn totals(&self) -> Macros {
        self.items.iter().map(|i| i.macros).sum()
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MealItemError {
    #[error("No meal item at position {0}")]
    IndexOutOfRange(usize),
    #[error(transparent)]
    Product(#[from] FoodItemError),
}
