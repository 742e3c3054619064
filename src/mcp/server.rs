//! FitFam MCP Server Implementation
//!
//! Implements the MCP server with all FitFam tools.

use std::sync::Arc;

use chrono::NaiveTime;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::db::Database;
use crate::error::AppError;
use crate::models::{AppSettingsUpdate, BodyMeasurements, CompletedExercise, CompletedSet};
use crate::remote::{Gateway, SqliteDocumentStore};
use crate::store::{AppStores, SqliteStorage};
use crate::tools::status::StatusTracker;
use crate::tools::tracking::ProgressInput;
use crate::tools::{account, catalog as catalog_tools, grocery, health, tracking, Services};
use crate::validation::ProfileForm;

/// FitFam MCP Service
#[derive(Clone)]
pub struct FitFamService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    catalog: Arc<Catalog>,
    stores: Arc<Mutex<AppStores>>,
    services: Services,
    tool_router: ToolRouter<FitFamService>,
}

impl FitFamService {
    /// Hydrate the client stores and connect the document store
    pub fn new(config: &AppConfig, database: Database, catalog: Catalog) -> Self {
        let stores = AppStores::persistent(Arc::new(SqliteStorage::new(database.clone())));
        let gateway = Gateway::new(
            Arc::new(SqliteDocumentStore::new(database)),
            config.remote_timeout,
        );

        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                config.database_path.clone(),
                config.remote_timeout,
            ))),
            catalog: Arc::new(catalog),
            stores: Arc::new(Mutex::new(stores)),
            services: Services::new(gateway),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Response helpers
// ============================================================================

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn found_or_error<T: Serialize>(value: Option<T>, what: &str, id: &str) -> Result<CallToolResult, McpError> {
    match value {
        Some(value) => json_result(&value),
        None => json_result(&serde_json::json!({ "error": format!("{} not found", what), "id": id })),
    }
}

/// Validation problems travel as `{"fields": {name: message}}` so clients can show them per field
fn tool_error(e: AppError) -> McpError {
    let data = match &e {
        AppError::Validation(errors)
        | AppError::Remote(crate::remote::RemoteError::Validation(errors))
        | AppError::Store(crate::store::StoreError::Validation(errors)) => {
            let fields: serde_json::Map<String, Value> = errors
                .fields()
                .map(|(field, message)| (field.to_string(), Value::String(message.to_string())))
                .collect();
            Some(serde_json::json!({ "fields": fields }))
        }
        _ => None,
    };
    if !e.is_user_error() {
        tracing::warn!(error = %e, "tool failed");
    }
    McpError::internal_error(e.to_string(), data)
}

/// Parse a lowercase choice such as "dark" or "lbs" into its enum
fn parse_choice<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, McpError> {
    serde_json::from_value(Value::String(raw.trim().to_lowercase())).map_err(|_| {
        McpError::internal_error(format!("Invalid value '{}' for {}", raw, field), None)
    })
}

// ============================================================================
// Catalog Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CatalogFilterParams {
    /// Goal: weight_loss, weight_gain, bulking, abs_cutting or maintenance (optional)
    pub goal: Option<String>,
    /// Level: beginner, intermediate or advanced (optional)
    pub level: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IdParams {
    /// Catalog id, e.g. plan_001, meal_002, prog_001, workout_001, ex_001
    pub id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListExercisesParams {
    /// Only exercises working this muscle group (optional)
    pub muscle_group: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GroceryListParams {
    /// Meal plan id (provide either plan_id OR meal_ids)
    pub plan_id: Option<String>,
    /// Meal ids, in order (provide either plan_id OR meal_ids)
    pub meal_ids: Option<Vec<String>>,
}

// ============================================================================
// Health Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BmiParams {
    /// Weight in kg (defaults to the latest recorded weight)
    pub weight_kg: Option<f64>,
    /// Height in cm (defaults to the profile height)
    pub height_cm: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CaloriesBurnedParams {
    /// Activity: walking, running, cycling, swimming, weightlifting, yoga, dancing, hiking
    pub activity: String,
    pub duration_minutes: f64,
    /// Weight in kg (defaults to the latest recorded weight)
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WaterGoalParams {
    pub weight_kg: Option<f64>,
    /// low, moderate or high (default low)
    pub activity_level: Option<String>,
}

// ============================================================================
// Account Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SignInParams {
    pub phone_number: String,
    /// The 6-digit code sent to the phone
    pub otp: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateProfileParams {
    pub phone_number: String,
    pub name: String,
    /// Age in years, as typed (13-100)
    pub age: String,
    /// Weight in kg, as typed (30-300)
    pub weight: String,
    /// Height in cm, as typed (100-250)
    pub height: String,
    /// weight_loss, weight_gain, bulking, abs_cutting or maintenance
    pub goal: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateSettingsParams {
    /// light or dark
    pub theme: Option<String>,
    pub language: Option<String>,
    /// kg or lbs
    pub weight_unit: Option<String>,
    /// cm or ft
    pub height_unit: Option<String>,
    /// km or miles
    pub distance_unit: Option<String>,
    /// celsius or fahrenheit
    pub temperature_unit: Option<String>,
    pub workout_reminders: Option<bool>,
    pub meal_reminders: Option<bool>,
    pub family_updates: Option<bool>,
    pub achievements: Option<bool>,
    /// Daily reminder time, HH:MM
    pub reminder_time: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateFamilyParams {
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct JoinFamilyParams {
    pub invite_code: String,
}

// ============================================================================
// Tracking Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectMealPlanParams {
    pub plan_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    pub meal_id: String,
    /// Servings eaten (default 1.0)
    #[serde(default = "default_servings")]
    pub servings: f64,
}

fn default_servings() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddWaterParams {
    /// Millilitres
    pub amount_ml: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDayParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectProgramParams {
    pub program_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StartWorkoutParams {
    pub workout_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompletedSetParam {
    pub reps: u32,
    /// Weight used, kg
    pub weight: Option<f64>,
    /// Seconds, for timed exercises
    pub duration: Option<u32>,
    #[serde(default = "default_true")]
    pub completed: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompletedExerciseParam {
    pub exercise_id: String,
    pub sets: Vec<CompletedSetParam>,
    #[serde(default = "default_true")]
    pub completed: bool,
}

fn default_true() -> bool { true }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompleteWorkoutParams {
    pub workout_id: String,
    /// Actual minutes (defaults to the workout's estimate)
    pub duration_minutes: Option<u32>,
    /// What was done; omit when the workout was done as prescribed
    pub exercises: Option<Vec<CompletedExerciseParam>>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HistoryParams {
    /// Maximum results (default 20)
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecordProgressParams {
    /// kg
    pub weight: Option<f64>,
    /// Percent
    pub body_fat: Option<f64>,
    /// Measurements in cm (all optional)
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub bicep: Option<f64>,
    pub thigh: Option<f64>,
    pub neck: Option<f64>,
    pub notes: Option<String>,
}

impl RecordProgressParams {
    fn into_input(self) -> ProgressInput {
        let measurements = BodyMeasurements {
            chest: self.chest,
            waist: self.waist,
            hips: self.hips,
            bicep: self.bicep,
            thigh: self.thigh,
            neck: self.neck,
        };
        ProgressInput {
            weight: self.weight,
            body_fat: self.body_fat,
            measurements: (measurements != BodyMeasurements::default()).then_some(measurements),
            notes: self.notes,
        }
    }
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl FitFamService {
    // --- Status ---

    #[tool(description = "Get the current status of the FitFam service including build info, database status, catalog size, and process information")]
    async fn fitfam_status(&self) -> Result<CallToolResult, McpError> {
        let stores = self.stores.lock().await;
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.catalog, &stores);
        json_result(&status)
    }

    #[tool(description = "Get step-by-step instructions for using the FitFam tools. Call this at the start of a session.")]
    fn usage_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::USAGE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    // --- Catalog ---

    #[tool(description = "List meal plans, optionally filtered by goal and level")]
    fn list_meal_plans(&self, Parameters(p): Parameters<CatalogFilterParams>) -> Result<CallToolResult, McpError> {
        let result = catalog_tools::list_meal_plans(&self.catalog, p.goal.as_deref(), p.level.as_deref())
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Get a meal plan with its meals and planned totals")]
    fn get_meal_plan(&self, Parameters(p): Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        found_or_error(catalog_tools::get_meal_plan(&self.catalog, &p.id), "Meal plan", &p.id)
    }

    #[tool(description = "Get a meal with ingredients and instructions")]
    fn get_meal(&self, Parameters(p): Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        found_or_error(catalog_tools::get_meal(&self.catalog, &p.id), "Meal", &p.id)
    }

    #[tool(description = "List workout programs, optionally filtered by goal and level")]
    fn list_workout_programs(&self, Parameters(p): Parameters<CatalogFilterParams>) -> Result<CallToolResult, McpError> {
        let result = catalog_tools::list_workout_programs(&self.catalog, p.goal.as_deref(), p.level.as_deref())
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Get a workout program with all of its workouts")]
    fn get_workout_program(&self, Parameters(p): Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        found_or_error(catalog_tools::get_workout_program(&self.catalog, &p.id), "Workout program", &p.id)
    }

    #[tool(description = "Get a single workout with its exercises")]
    fn get_workout(&self, Parameters(p): Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        found_or_error(catalog_tools::get_workout(&self.catalog, &p.id), "Workout", &p.id)
    }

    #[tool(description = "Get an exercise with instructions, muscle groups and equipment")]
    fn get_exercise(&self, Parameters(p): Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        found_or_error(catalog_tools::get_exercise(&self.catalog, &p.id), "Exercise", &p.id)
    }

    #[tool(description = "List exercises, optionally only those working a muscle group")]
    fn list_exercises(&self, Parameters(p): Parameters<ListExercisesParams>) -> Result<CallToolResult, McpError> {
        json_result(&catalog_tools::list_exercises(&self.catalog, p.muscle_group.as_deref()))
    }

    #[tool(description = "Build a shopping list for a meal plan or a list of meals. Repeated ingredients are merged.")]
    fn grocery_list(&self, Parameters(p): Parameters<GroceryListParams>) -> Result<CallToolResult, McpError> {
        let result = match (p.plan_id, p.meal_ids) {
            (Some(plan_id), None) => grocery::grocery_list_for_plan(&self.catalog, &plan_id),
            (None, Some(meal_ids)) => grocery::grocery_list_for_meals(&self.catalog, &meal_ids),
            _ => Err(AppError::InvalidInput("Provide either plan_id or meal_ids".to_string())),
        }
        .map_err(tool_error)?;
        json_result(&result)
    }

    // --- Health ---

    #[tool(description = "Calculate BMI and its category")]
    async fn calculate_bmi(&self, Parameters(p): Parameters<BmiParams>) -> Result<CallToolResult, McpError> {
        let stores = self.stores.lock().await;
        json_result(&health::bmi(&stores, p.weight_kg, p.height_cm).map_err(tool_error)?)
    }

    #[tool(description = "Estimate calories burned by an activity (MET based)")]
    async fn calories_burned(&self, Parameters(p): Parameters<CaloriesBurnedParams>) -> Result<CallToolResult, McpError> {
        let stores = self.stores.lock().await;
        let result = health::calories_burned(&stores, &p.activity, p.duration_minutes, p.weight_kg)
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Daily water goal and how much is left for today")]
    async fn water_goal(&self, Parameters(p): Parameters<WaterGoalParams>) -> Result<CallToolResult, McpError> {
        let stores = self.stores.lock().await;
        let result = health::water_goal(&stores, p.weight_kg, p.activity_level.as_deref())
            .map_err(tool_error)?;
        json_result(&result)
    }

    // --- Account ---

    #[tool(description = "Sign in with a phone number and 6-digit code. Reports needs_profile for new numbers.")]
    async fn sign_in(&self, Parameters(p): Parameters<SignInParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = account::sign_in(&mut stores, &self.services, &p.phone_number, &p.otp)
            .await
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Create the profile for a new phone number and sign in")]
    async fn create_profile(&self, Parameters(p): Parameters<CreateProfileParams>) -> Result<CallToolResult, McpError> {
        let goal = catalog_tools::parse_goal(&p.goal).map_err(tool_error)?;
        let form = ProfileForm {
            name: p.name,
            age: p.age,
            weight: p.weight,
            height: p.height,
            goal,
        };
        let mut stores = self.stores.lock().await;
        let result = account::create_profile(&mut stores, &self.services, &p.phone_number, &form)
            .await
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Sign out the current user")]
    async fn sign_out(&self) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        account::sign_out(&mut stores).map_err(tool_error)?;
        json_result(&serde_json::json!({ "success": true }))
    }

    #[tool(description = "Get the signed-in user's app settings")]
    async fn get_settings(&self) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        json_result(&account::get_settings(&mut stores).map_err(tool_error)?)
    }

    #[tool(description = "Update app settings. Only the given fields change.")]
    async fn update_settings(&self, Parameters(p): Parameters<UpdateSettingsParams>) -> Result<CallToolResult, McpError> {
        if let Some(time) = &p.reminder_time {
            NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| {
                McpError::internal_error(format!("Invalid reminder_time '{}'. Use HH:MM", time), None)
            })?;
        }

        let mut stores = self.stores.lock().await;
        let current = account::get_settings(&mut stores).map_err(tool_error)?;

        let mut units = current.units;
        if let Some(raw) = &p.weight_unit {
            units.weight = parse_choice("weight_unit", raw)?;
        }
        if let Some(raw) = &p.height_unit {
            units.height = parse_choice("height_unit", raw)?;
        }
        if let Some(raw) = &p.distance_unit {
            units.distance = parse_choice("distance_unit", raw)?;
        }
        if let Some(raw) = &p.temperature_unit {
            units.temperature = parse_choice("temperature_unit", raw)?;
        }

        let mut notifications = current.notifications.clone();
        notifications.workout_reminders = p.workout_reminders.unwrap_or(notifications.workout_reminders);
        notifications.meal_reminders = p.meal_reminders.unwrap_or(notifications.meal_reminders);
        notifications.family_updates = p.family_updates.unwrap_or(notifications.family_updates);
        notifications.achievements = p.achievements.unwrap_or(notifications.achievements);
        if let Some(time) = p.reminder_time {
            notifications.reminder_time = time.trim().to_string();
        }

        let update = AppSettingsUpdate {
            notifications: Some(notifications),
            units: Some(units),
            theme: p.theme.as_deref().map(|raw| parse_choice("theme", raw)).transpose()?,
            language: p.language,
        };
        json_result(&account::update_settings(&mut stores, update).map_err(tool_error)?)
    }

    // --- Family ---

    #[tool(description = "Create a family group and get its invite code")]
    async fn create_family(&self, Parameters(p): Parameters<CreateFamilyParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = account::create_family(&mut stores, &self.services, &p.name)
            .await
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Join a family group with an invite code")]
    async fn join_family(&self, Parameters(p): Parameters<JoinFamilyParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = account::join_family(&mut stores, &self.services, &p.invite_code)
            .await
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Get the family group, its members and the recent activity feed")]
    async fn get_family(&self) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = account::refresh_family(&mut stores, &self.services)
            .await
            .map_err(tool_error)?;
        json_result(&result)
    }

    // --- Nutrition tracking ---

    #[tool(description = "Follow a meal plan")]
    async fn select_meal_plan(&self, Parameters(p): Parameters<SelectMealPlanParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = tracking::select_meal_plan(&mut stores, &self.catalog, &p.plan_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Log servings of a catalog meal in today's nutrition log")]
    async fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = tracking::log_meal(&mut stores, &self.services, &self.catalog, &p.meal_id, p.servings)
            .await
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Add water (ml) to today's intake")]
    async fn add_water(&self, Parameters(p): Parameters<AddWaterParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        json_result(&tracking::add_water(&mut stores, p.amount_ml).map_err(tool_error)?)
    }

    #[tool(description = "Get today's nutrition log: meals, calories, macros and water")]
    async fn get_today(&self) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        json_result(&tracking::today(&mut stores).map_err(tool_error)?)
    }

    #[tool(description = "Save today's nutrition log so it appears in get_day")]
    async fn save_day(&self) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = tracking::save_day(&mut stores, &self.services).await.map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Get the saved nutrition log for a date")]
    async fn get_day(&self, Parameters(p): Parameters<GetDayParams>) -> Result<CallToolResult, McpError> {
        let stores = self.stores.lock().await;
        let result = tracking::get_day(&stores, &self.services, &p.date)
            .await
            .map_err(tool_error)?;
        found_or_error(result, "Daily nutrition log", &p.date)
    }

    // --- Workout tracking ---

    #[tool(description = "Follow a workout program; its first workout becomes today's workout")]
    async fn select_program(&self, Parameters(p): Parameters<SelectProgramParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = tracking::select_program(&mut stores, &self.catalog, &p.program_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Start a workout")]
    async fn start_workout(&self, Parameters(p): Parameters<StartWorkoutParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = tracking::start_workout(&mut stores, &self.catalog, &p.workout_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Record a finished workout session and share it with the family")]
    async fn complete_workout(&self, Parameters(p): Parameters<CompleteWorkoutParams>) -> Result<CallToolResult, McpError> {
        let exercises = p.exercises.map(|exercises| {
            exercises
                .into_iter()
                .map(|e| CompletedExercise {
                    exercise_id: e.exercise_id,
                    sets: e
                        .sets
                        .into_iter()
                        .map(|s| CompletedSet {
                            reps: s.reps,
                            weight: s.weight,
                            duration: s.duration,
                            completed: s.completed,
                        })
                        .collect(),
                    completed: e.completed,
                })
                .collect()
        });
        let mut stores = self.stores.lock().await;
        let result = tracking::complete_workout(
            &mut stores,
            &self.services,
            &self.catalog,
            &p.workout_id,
            p.duration_minutes,
            exercises,
            p.notes,
        )
        .await
        .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "List recent workout sessions, newest first")]
    async fn workout_history(&self, Parameters(p): Parameters<HistoryParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = tracking::workout_history(&mut stores, &self.services, p.limit)
            .await
            .map_err(tool_error)?;
        json_result(&result)
    }

    // --- Progress ---

    #[tool(description = "Record weight, body fat and/or body measurements")]
    async fn record_progress(&self, Parameters(p): Parameters<RecordProgressParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = tracking::record_progress(&mut stores, &self.services, p.into_input())
            .await
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "List recent progress entries, newest first, with current weight and body fat")]
    async fn progress_history(&self, Parameters(p): Parameters<HistoryParams>) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        let result = tracking::progress_history(&mut stores, &self.services, p.limit)
            .await
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Retry saving any client store whose last save failed")]
    async fn flush_stores(&self) -> Result<CallToolResult, McpError> {
        let mut stores = self.stores.lock().await;
        stores.flush_all().map_err(|e| tool_error(e.into()))?;
        json_result(&serde_json::json!({ "success": true }))
    }
}

#[tool_handler]
impl ServerHandler for FitFamService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fitfam".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FitFam Trainer".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FitFam Trainer - family fitness, meal planning and progress tracking. \
                 IMPORTANT: Call usage_instructions first. \
                 Account: sign_in, create_profile, sign_out, get_settings, update_settings. \
                 Catalog: list_meal_plans, get_meal_plan, get_meal, list_workout_programs, \
                 get_workout_program, get_workout, get_exercise, list_exercises, grocery_list. \
                 Health: calculate_bmi, calories_burned, water_goal. \
                 Nutrition: select_meal_plan, log_meal, add_water, get_today, save_day, get_day. \
                 Workouts: select_program, start_workout, complete_workout, workout_history. \
                 Progress: record_progress, progress_history. \
                 Family: create_family, join_family, get_family. \
                 Maintenance: fitfam_status, flush_stores."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_carry_fields() {
        let errors = crate::validation::ValidationErrors::single("age", "Please enter a valid age (13-100)");
        let err = tool_error(AppError::Validation(errors));
        let data = err.data.unwrap();
        assert_eq!(data["fields"]["age"], "Please enter a valid age (13-100)");
    }

    #[test]
    fn test_parse_choice() {
        let theme: crate::models::Theme = parse_choice("theme", " Dark ").unwrap();
        assert_eq!(theme, crate::models::Theme::Dark);
        assert!(parse_choice::<crate::models::WeightUnit>("weight_unit", "stone").is_err());
    }

    #[test]
    fn test_progress_params_without_measurements() {
        let params = RecordProgressParams {
            weight: Some(70.0),
            body_fat: None,
            chest: None,
            waist: None,
            hips: None,
            bicep: None,
            thigh: None,
            neck: None,
            notes: None,
        };
        assert!(params.into_input().measurements.is_none());
    }
}
