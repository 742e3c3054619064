//! Exercise and workout program tables

use super::{ExerciseDef, ProgramDef, RepsDef, WorkoutDef};
use crate::models::{ExerciseCategory, FitnessGoal, FitnessLevel};

pub const EXERCISES: &[ExerciseDef] = &[
    ExerciseDef {
        id: "ex_001",
        name: "Push-ups",
        category: ExerciseCategory::Strength,
        sets: 3,
        reps: RepsDef::Text("10-15"),
        rest_time: 60,
        instructions: &[
            "Start in a plank position with hands slightly wider than shoulders",
            "Lower your body until chest nearly touches the floor",
            "Push back up to starting position",
            "Keep your core tight throughout the movement",
        ],
        muscle_groups: &["chest", "shoulders", "triceps", "core"],
        equipment: &["bodyweight"],
        animation_url: Some("https://example.com/animations/pushups.gif"),
    },
    ExerciseDef {
        id: "ex_002",
        name: "Squats",
        category: ExerciseCategory::Compound,
        sets: 3,
        reps: RepsDef::Text("12-20"),
        rest_time: 90,
        instructions: &[
            "Stand with feet shoulder-width apart",
            "Lower your body as if sitting back into a chair",
            "Keep your chest up and knees behind toes",
            "Return to starting position by driving through heels",
        ],
        muscle_groups: &["quadriceps", "glutes", "hamstrings", "core"],
        equipment: &["bodyweight"],
        animation_url: Some("https://example.com/animations/squats.gif"),
    },
    ExerciseDef {
        id: "ex_003",
        name: "Plank",
        category: ExerciseCategory::Core,
        sets: 3,
        reps: RepsDef::Text("30-60 seconds"),
        rest_time: 60,
        instructions: &[
            "Start in a push-up position",
            "Lower onto your forearms",
            "Keep your body in a straight line from head to heels",
            "Hold the position while breathing normally",
        ],
        muscle_groups: &["core", "shoulders", "back"],
        equipment: &["bodyweight"],
        animation_url: Some("https://example.com/animations/plank.gif"),
    },
    ExerciseDef {
        id: "ex_004",
        name: "Burpees",
        category: ExerciseCategory::Cardio,
        sets: 3,
        reps: RepsDef::Text("8-12"),
        rest_time: 90,
        instructions: &[
            "Start standing, then squat down and place hands on floor",
            "Jump feet back into plank position",
            "Do a push-up (optional)",
            "Jump feet back to squat position",
            "Jump up with arms overhead",
        ],
        muscle_groups: &["full body"],
        equipment: &["bodyweight"],
        animation_url: Some("https://example.com/animations/burpees.gif"),
    },
    ExerciseDef {
        id: "ex_005",
        name: "Lunges",
        category: ExerciseCategory::Strength,
        sets: 3,
        reps: RepsDef::Text("10-12 each leg"),
        rest_time: 60,
        instructions: &[
            "Stand with feet hip-width apart",
            "Step forward with one leg, lowering hips",
            "Both knees should be at 90-degree angles",
            "Push back to starting position",
            "Repeat with other leg",
        ],
        muscle_groups: &["quadriceps", "glutes", "hamstrings", "calves"],
        equipment: &["bodyweight"],
        animation_url: Some("https://example.com/animations/lunges.gif"),
    },
    ExerciseDef {
        id: "ex_006",
        name: "Mountain Climbers",
        category: ExerciseCategory::Cardio,
        sets: 3,
        reps: RepsDef::Text("30 seconds"),
        rest_time: 45,
        instructions: &[
            "Start in plank position",
            "Bring one knee toward chest",
            "Quickly switch legs",
            "Continue alternating at a fast pace",
            "Keep core engaged throughout",
        ],
        muscle_groups: &["core", "shoulders", "legs"],
        equipment: &["bodyweight"],
        animation_url: Some("https://example.com/animations/mountain_climbers.gif"),
    },
    ExerciseDef {
        id: "ex_007",
        name: "Jumping Jacks",
        category: ExerciseCategory::Cardio,
        sets: 3,
        reps: RepsDef::Text("30 seconds"),
        rest_time: 30,
        instructions: &[
            "Stand with feet together, arms at sides",
            "Jump while spreading legs shoulder-width apart",
            "Simultaneously raise arms overhead",
            "Jump back to starting position",
            "Maintain a steady rhythm",
        ],
        muscle_groups: &["full body"],
        equipment: &["bodyweight"],
        animation_url: Some("https://example.com/animations/jumping_jacks.gif"),
    },
    ExerciseDef {
        id: "ex_008",
        name: "Dumbbell Rows",
        category: ExerciseCategory::Strength,
        sets: 3,
        reps: RepsDef::Text("10-12"),
        rest_time: 90,
        instructions: &[
            "Hold dumbbells with arms extended",
            "Hinge at hips, keeping back straight",
            "Pull dumbbells to your ribs",
            "Squeeze shoulder blades together",
            "Lower with control",
        ],
        muscle_groups: &["back", "biceps", "rear delts"],
        equipment: &["dumbbells"],
        animation_url: Some("https://example.com/animations/dumbbell_rows.gif"),
    },
    ExerciseDef {
        id: "ex_009",
        name: "Bicycle Crunches",
        category: ExerciseCategory::Core,
        sets: 3,
        reps: RepsDef::Text("15-20 each side"),
        rest_time: 45,
        instructions: &[
            "Lie on back with hands behind head",
            "Bring knees to 90-degree angle",
            "Bring right elbow to left knee",
            "Switch sides in cycling motion",
            "Keep core engaged throughout",
        ],
        muscle_groups: &["core", "obliques"],
        equipment: &["bodyweight"],
        animation_url: Some("https://example.com/animations/bicycle_crunches.gif"),
    },
    ExerciseDef {
        id: "ex_010",
        name: "Wall Sit",
        category: ExerciseCategory::Strength,
        sets: 3,
        reps: RepsDef::Text("30-60 seconds"),
        rest_time: 90,
        instructions: &[
            "Stand with back against wall",
            "Slide down until thighs are parallel to floor",
            "Keep knees at 90-degree angle",
            "Hold position while breathing normally",
            "Keep core engaged",
        ],
        muscle_groups: &["quadriceps", "glutes", "core"],
        equipment: &["wall"],
        animation_url: Some("https://example.com/animations/wall_sit.gif"),
    },
];

pub const PROGRAMS: &[ProgramDef] = &[
    ProgramDef {
        id: "prog_001",
        name: "Fat Burn Beginner",
        goal: FitnessGoal::WeightLoss,
        level: FitnessLevel::Beginner,
        duration: 12,
        description: "A comprehensive 12-week program designed for beginners to lose weight through cardio and basic strength training.",
        workouts: &[
            WorkoutDef {
                id: "workout_001",
                name: "Full Body Cardio",
                day: 1,
                week: 1,
                estimated_duration: 30,
                exercises: &["ex_007", "ex_004", "ex_006", "ex_002", "ex_003"],
            },
            WorkoutDef {
                id: "workout_002",
                name: "Upper Body Strength",
                day: 3,
                week: 1,
                estimated_duration: 25,
                exercises: &["ex_001", "ex_008", "ex_003", "ex_009"],
            },
            WorkoutDef {
                id: "workout_003",
                name: "Lower Body Power",
                day: 5,
                week: 1,
                estimated_duration: 30,
                exercises: &["ex_002", "ex_005", "ex_010", "ex_006"],
            },
        ],
    },
    ProgramDef {
        id: "prog_002",
        name: "HIIT Fat Burner",
        goal: FitnessGoal::WeightLoss,
        level: FitnessLevel::Intermediate,
        duration: 12,
        description: "High-intensity interval training program for faster fat loss and improved cardiovascular fitness.",
        workouts: &[WorkoutDef {
            id: "workout_004",
            name: "HIIT Circuit A",
            day: 1,
            week: 1,
            estimated_duration: 35,
            exercises: &["ex_004", "ex_006", "ex_007", "ex_002", "ex_001"],
        }],
    },
    ProgramDef {
        id: "prog_003",
        name: "Lean Mass Builder",
        goal: FitnessGoal::WeightGain,
        level: FitnessLevel::Beginner,
        duration: 12,
        description: "Build lean muscle mass with progressive strength training and proper nutrition guidance.",
        workouts: &[
            WorkoutDef {
                id: "workout_005",
                name: "Upper Body Mass",
                day: 1,
                week: 1,
                estimated_duration: 45,
                exercises: &["ex_001", "ex_008", "ex_003"],
            },
            WorkoutDef {
                id: "workout_006",
                name: "Lower Body Mass",
                day: 3,
                week: 1,
                estimated_duration: 45,
                exercises: &["ex_002", "ex_005", "ex_010"],
            },
        ],
    },
    ProgramDef {
        id: "prog_004",
        name: "Power Bulking",
        goal: FitnessGoal::Bulking,
        level: FitnessLevel::Advanced,
        duration: 12,
        description: "Advanced bulking program for serious muscle and strength gains.",
        workouts: &[WorkoutDef {
            id: "workout_007",
            name: "Heavy Compound Day",
            day: 1,
            week: 1,
            estimated_duration: 60,
            exercises: &["ex_002", "ex_001", "ex_008"],
        }],
    },
    ProgramDef {
        id: "prog_005",
        name: "Core Shredder",
        goal: FitnessGoal::AbsCutting,
        level: FitnessLevel::Intermediate,
        duration: 12,
        description: "Intensive core-focused program to build defined abs and lose belly fat.",
        workouts: &[WorkoutDef {
            id: "workout_008",
            name: "Core Blast",
            day: 1,
            week: 1,
            estimated_duration: 30,
            exercises: &["ex_003", "ex_009", "ex_006", "ex_004"],
        }],
    },
    ProgramDef {
        id: "prog_006",
        name: "Fitness Maintenance",
        goal: FitnessGoal::Maintenance,
        level: FitnessLevel::Intermediate,
        duration: 12,
        description: "Balanced program to maintain current fitness level and overall health.",
        workouts: &[WorkoutDef {
            id: "workout_009",
            name: "Full Body Maintenance",
            day: 1,
            week: 1,
            estimated_duration: 40,
            exercises: &["ex_002", "ex_001", "ex_005", "ex_003", "ex_007"],
        }],
    },
];
