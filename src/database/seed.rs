// ABOUTME: Reference data seeding for the activity MET table and the food catalog
// ABOUTME: Idempotent inserts run at startup when seeding is enabled

use super::Database;
use crate::errors::AppResult;
use gohealth_core::models::ActivityCategory;

/// Seed row of the activity MET table: id, name, category, MET, description
struct ActivitySeed(&'static str, &'static str, ActivityCategory, f64, &'static str);

/// Seed row of the food catalog: id, name, category, serving, kcal, protein, carbohydrate, fat
struct FoodSeed(&'static str, &'static str, &'static str, &'static str, f64, f64, f64, f64);

const ACTIVITY_TYPES: &[ActivitySeed] = &[
    ActivitySeed("casual-walk", "Casual Walk", ActivityCategory::Cardio, 3.5, "Walking at a normal pace"),
    ActivitySeed("brisk-walk", "Brisk Walk", ActivityCategory::Cardio, 4.3, "Walking at a fast pace"),
    ActivitySeed("jogging", "Jogging", ActivityCategory::Cardio, 7.0, "Running at a moderate pace"),
    ActivitySeed("running", "Running", ActivityCategory::Cardio, 9.8, "Running at a fast pace"),
    ActivitySeed("casual-cycling", "Casual Cycling", ActivityCategory::Cardio, 4.0, "Cycling at a low speed"),
    ActivitySeed("fast-cycling", "Fast Cycling", ActivityCategory::Cardio, 8.0, "Cycling at a high speed"),
    ActivitySeed("swimming", "Swimming", ActivityCategory::Cardio, 6.0, "Swimming at a moderate pace"),
    ActivitySeed("aerobics", "Aerobics", ActivityCategory::Cardio, 6.5, "Aerobic exercise class"),
    ActivitySeed("light-weights", "Light Weights", ActivityCategory::Strength, 3.5, "Low intensity weight training"),
    ActivitySeed("heavy-weights", "Heavy Weights", ActivityCategory::Strength, 6.0, "High intensity weight training"),
    ActivitySeed("push-up", "Push Up", ActivityCategory::Strength, 8.0, "Push ups"),
    ActivitySeed("sit-up", "Sit Up", ActivityCategory::Strength, 8.0, "Sit ups"),
    ActivitySeed("plank", "Plank", ActivityCategory::Strength, 4.0, "Plank holds"),
    ActivitySeed("yoga", "Yoga", ActivityCategory::Flexibility, 2.5, "Light yoga"),
    ActivitySeed("pilates", "Pilates", ActivityCategory::Flexibility, 3.0, "Pilates"),
    ActivitySeed("stretching", "Stretching", ActivityCategory::Flexibility, 2.5, "Stretching"),
    ActivitySeed("badminton", "Badminton", ActivityCategory::Sports, 5.5, "Playing badminton"),
    ActivitySeed("football", "Football", ActivityCategory::Sports, 7.0, "Playing football"),
    ActivitySeed("basketball", "Basketball", ActivityCategory::Sports, 6.5, "Playing basketball"),
    ActivitySeed("tennis", "Tennis", ActivityCategory::Sports, 7.3, "Playing tennis"),
    ActivitySeed("volleyball", "Volleyball", ActivityCategory::Sports, 4.0, "Playing volleyball"),
    ActivitySeed("house-cleaning", "House Cleaning", ActivityCategory::Daily, 3.5, "Cleaning the house"),
    ActivitySeed("gardening", "Gardening", ActivityCategory::Daily, 4.0, "Gardening"),
    ActivitySeed("stair-climbing", "Stair Climbing", ActivityCategory::Daily, 8.0, "Climbing stairs"),
    ActivitySeed("shopping", "Shopping", ActivityCategory::Daily, 2.3, "Walking while shopping"),
    ActivitySeed("cooking", "Cooking", ActivityCategory::Daily, 2.5, "Cooking"),
    ActivitySeed("washing-dishes", "Washing Dishes", ActivityCategory::Daily, 2.3, "Washing dishes"),
    ActivitySeed("sweeping", "Sweeping", ActivityCategory::Daily, 3.3, "Sweeping the floor"),
    ActivitySeed("mopping", "Mopping", ActivityCategory::Daily, 3.5, "Mopping the floor"),
];

const FOODS: &[FoodSeed] = &[
    FoodSeed("chicken-breast", "Chicken Breast", "Meat", "100 g", 165.0, 31.0, 0.0, 3.6),
    FoodSeed("beef-steak", "Beef Steak", "Meat", "100 g", 271.0, 25.0, 0.0, 19.0),
    FoodSeed("lamb-chop", "Lamb Chop", "Meat", "100 g", 294.0, 25.0, 0.0, 21.0),
    FoodSeed("banana", "Banana", "Fruit", "1 medium (118 g)", 105.0, 1.3, 27.0, 0.4),
    FoodSeed("apple", "Apple", "Fruit", "1 medium (182 g)", 95.0, 0.5, 25.0, 0.3),
    FoodSeed("orange", "Orange", "Fruit", "1 medium (131 g)", 62.0, 1.2, 15.4, 0.2),
    FoodSeed("mango", "Mango", "Fruit", "1 cup (165 g)", 99.0, 1.4, 24.7, 0.6),
    FoodSeed("salmon", "Salmon", "Fish & Seafood", "100 g", 208.0, 20.0, 0.0, 13.0),
    FoodSeed("tuna", "Tuna", "Fish & Seafood", "100 g", 132.0, 28.0, 0.0, 1.3),
    FoodSeed("shrimp", "Shrimp", "Fish & Seafood", "100 g", 99.0, 24.0, 0.2, 0.3),
    FoodSeed("broccoli", "Broccoli", "Vegetables", "1 cup (91 g)", 31.0, 2.5, 6.0, 0.3),
    FoodSeed("spinach", "Spinach", "Vegetables", "1 cup (30 g)", 7.0, 0.9, 1.1, 0.1),
    FoodSeed("carrot", "Carrot", "Vegetables", "1 medium (61 g)", 25.0, 0.6, 6.0, 0.1),
    FoodSeed("white-rice", "White Rice", "Bread & Cereal", "1 cup cooked (158 g)", 205.0, 4.3, 44.5, 0.4),
    FoodSeed("whole-wheat-bread", "Whole Wheat Bread", "Bread & Cereal", "1 slice (32 g)", 81.0, 4.0, 13.8, 1.1),
    FoodSeed("oatmeal", "Oatmeal", "Bread & Cereal", "1 cup cooked (234 g)", 166.0, 5.9, 28.1, 3.6),
    FoodSeed("cheddar-cheese", "Cheddar Cheese", "Cheese & Milk", "1 slice (28 g)", 113.0, 7.0, 0.4, 9.3),
    FoodSeed("whole-milk", "Whole Milk", "Cheese & Milk", "1 cup (244 g)", 149.0, 7.7, 11.7, 7.9),
    FoodSeed("greek-yogurt", "Greek Yogurt", "Cheese & Milk", "170 g", 100.0, 17.0, 6.0, 0.7),
    FoodSeed("boiled-egg", "Boiled Egg", "Eggs", "1 large (50 g)", 78.0, 6.3, 0.6, 5.3),
    FoodSeed("fried-egg", "Fried Egg", "Eggs", "1 large (46 g)", 90.0, 6.3, 0.4, 6.8),
];

impl Database {
    /// Insert the activity MET table and food catalog, leaving existing rows untouched
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails
    pub async fn seed_reference_data(&self) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        for ActivitySeed(id, name, category, met_value, description) in ACTIVITY_TYPES {
            sqlx::query(
                r"
                INSERT OR IGNORE INTO activity_types (id, name, category, met_value, description)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(*id)
            .bind(*name)
            .bind(category.as_str())
            .bind(*met_value)
            .bind(*description)
            .execute(&mut *tx)
            .await?;
        }

        for FoodSeed(id, name, category, serving, calories, protein, carbohydrates, fat) in FOODS {
            sqlx::query(
                r"
                INSERT OR IGNORE INTO foods (id, name, category, serving, calories, protein, carbohydrates, fat)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ",
            )
            .bind(*id)
            .bind(*name)
            .bind(*category)
            .bind(*serving)
            .bind(*calories)
            .bind(*protein)
            .bind(*carbohydrates)
            .bind(*fat)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::info!(
            activity_types = ACTIVITY_TYPES.len(),
            foods = FOODS.len(),
            "Reference data seeded"
        );
        Ok(())
    }
}
