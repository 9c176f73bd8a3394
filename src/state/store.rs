//! In-memory storage for users, workouts, goals and timer settings
//!
//! A plain map per record type with a monotonically increasing id counter.
//! Durability is a non-goal; everything lives for the lifetime of the
//! process.

use std::collections::HashMap;

use chrono::Utc;

use crate::models::{
    Goal, InsertGoal, InsertTimerSettings, InsertUser, InsertWorkout, TimerSettings, UpdateGoal,
    UpdateWorkout, User, Workout,
};

#[derive(Debug, Default)]
pub struct MemStore {
    users: HashMap<u32, User>,
    workouts: HashMap<u32, Workout>,
    goals: HashMap<u32, Goal>,
    timer_settings: HashMap<u32, TimerSettings>,
    next_user_id: u32,
    next_workout_id: u32,
    next_goal_id: u32,
    next_settings_id: u32,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            workouts: HashMap::new(),
            goals: HashMap::new(),
            timer_settings: HashMap::new(),
            next_user_id: 1,
            next_workout_id: 1,
            next_goal_id: 1,
            next_settings_id: 1,
        }
    }

    // User methods

    pub fn get_user(&self, id: u32) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username == username)
    }

    pub fn create_user(&mut self, insert: InsertUser) -> User {
        let id = self.next_user_id;
        self.next_user_id += 1;
        let user = User {
            id,
            username: insert.username,
            password: insert.password,
        };
        self.users.insert(id, user.clone());
        user
    }

    // Workout methods

    /// All workouts for a user, newest first.
    pub fn workouts_for_user(&self, user_id: u32) -> Vec<Workout> {
        let mut workouts: Vec<Workout> = self
            .workouts
            .values()
            .filter(|workout| workout.user_id == user_id)
            .cloned()
            .collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        workouts
    }

    pub fn get_workout(&self, id: u32) -> Option<&Workout> {
        self.workouts.get(&id)
    }

    pub fn create_workout(&mut self, user_id: u32, insert: InsertWorkout) -> Workout {
        let id = self.next_workout_id;
        self.next_workout_id += 1;
        let workout = Workout {
            id,
            user_id,
            exercise_type: insert.exercise_type,
            exercise_name: insert.exercise_name,
            duration: insert.duration,
            intensity: insert.intensity,
            notes: insert.notes,
            date: Utc::now(),
        };
        self.workouts.insert(id, workout.clone());
        workout
    }

    pub fn update_workout(&mut self, id: u32, update: UpdateWorkout) -> Option<Workout> {
        let workout = self.workouts.get_mut(&id)?;
        if let Some(exercise_type) = update.exercise_type {
            workout.exercise_type = exercise_type;
        }
        if let Some(exercise_name) = update.exercise_name {
            workout.exercise_name = exercise_name;
        }
        if let Some(duration) = update.duration {
            workout.duration = duration;
        }
        if let Some(intensity) = update.intensity {
            workout.intensity = intensity;
        }
        if let Some(notes) = update.notes {
            workout.notes = Some(notes);
        }
        Some(workout.clone())
    }

    pub fn delete_workout(&mut self, id: u32) -> bool {
        self.workouts.remove(&id).is_some()
    }

    // Goal methods

    pub fn goals_for_user(&self, user_id: u32) -> Vec<Goal> {
        let mut goals: Vec<Goal> = self
            .goals
            .values()
            .filter(|goal| goal.user_id == user_id)
            .cloned()
            .collect();
        goals.sort_by_key(|goal| goal.id);
        goals
    }

    pub fn get_goal(&self, id: u32) -> Option<&Goal> {
        self.goals.get(&id)
    }

    pub fn create_goal(&mut self, user_id: u32, insert: InsertGoal) -> Goal {
        let id = self.next_goal_id;
        self.next_goal_id += 1;
        let goal = Goal {
            id,
            user_id,
            title: insert.title,
            target: insert.target,
            current: 0,
            goal_type: insert.goal_type,
            completed: false,
            date: Utc::now(),
        };
        self.goals.insert(id, goal.clone());
        goal
    }

    /// Apply a partial update, marking the goal completed once its progress
    /// reaches the target.
    pub fn update_goal(&mut self, id: u32, update: UpdateGoal) -> Option<Goal> {
        let goal = self.goals.get_mut(&id)?;
        if let Some(title) = update.title {
            goal.title = title;
        }
        if let Some(target) = update.target {
            goal.target = target;
        }
        if let Some(current) = update.current {
            goal.current = current;
        }
        if let Some(goal_type) = update.goal_type {
            goal.goal_type = goal_type;
        }
        if goal.current >= goal.target {
            goal.completed = true;
        }
        Some(goal.clone())
    }

    pub fn delete_goal(&mut self, id: u32) -> bool {
        self.goals.remove(&id).is_some()
    }

    // Timer settings methods

    pub fn timer_settings_for_user(&self, user_id: u32) -> Option<&TimerSettings> {
        self.timer_settings
            .values()
            .find(|settings| settings.user_id == user_id)
    }

    /// Create the user's settings row on first save, overwrite it afterwards.
    pub fn upsert_timer_settings(
        &mut self,
        user_id: u32,
        insert: InsertTimerSettings,
    ) -> TimerSettings {
        let existing_id = self
            .timer_settings_for_user(user_id)
            .map(|settings| settings.id);
        let id = existing_id.unwrap_or_else(|| {
            let id = self.next_settings_id;
            self.next_settings_id += 1;
            id
        });
        let settings = TimerSettings {
            id,
            user_id,
            interval_duration: insert.interval_duration,
            interval_count: insert.interval_count,
            sound_enabled: insert.sound_enabled,
            count_direction: insert.count_direction,
        };
        self.timer_settings.insert(id, settings.clone());
        settings
    }
}
