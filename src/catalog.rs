//! Static screening question catalog
//!
//! Question keys double as the feature column names of the training dataset,
//! so the order here is also the canonical feature order.

/// One yes/no screening question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
}

const fn q(key: &'static str, prompt: &'static str) -> Question {
    Question { key, prompt }
}

/// Questions in the order they are asked
pub const QUESTIONS: &[Question] = &[
    q("Thirst", "Do you often feel excessively thirsty or have a dry mouth?"),
    q("Frequent_Urination", "Do you urinate more frequently than usual, especially at night?"),
    q("Weight_Loss", "Have you experienced unexplained weight loss recently?"),
    q("Fatigue", "Do you feel tired or fatigued most of the time, even with enough sleep?"),
    q("Chest_Pain", "Do you frequently experience chest pain or tightness during activity?"),
    q("Snoring", "Do you snore loudly or stop breathing while sleeping (observed by others)?"),
    q("Morning_Headache", "Do you often wake up with a headache or dry mouth?"),
    q("High_BP", "Have you ever been diagnosed with high blood pressure?"),
    q("Short_Breath", "Do you feel short of breath during light physical activity or rest?"),
    q("Persistent_Cough", "Do you have a persistent cough, especially with mucus?"),
    q(
        "Depressed_Mood",
        "Do you feel sad, hopeless, or uninterested in daily activities for more than two weeks?",
    ),
    q("Concentration_Issues", "Do you have trouble concentrating or remembering things?"),
    q("Weight_Gain", "Have you gained weight recently without a major change in diet or activity?"),
    q("Swelling", "Do you experience swelling in your ankles, feet, or face?"),
    q("Joint_Pain", "Do your joints ache or feel stiff, especially in the morning?"),
    q("Indigestion", "Do you have frequent indigestion, heartburn, or acid reflux?"),
    q("Jaundice", "Have you noticed yellowing of your skin or eyes (jaundice)?"),
    q("Unhealthy_Diet", "Is your diet high in processed, fried, or sugary foods?"),
    q("High_Cholesterol", "Have you ever been told your cholesterol or triglyceride levels are high?"),
    q("Feel_Cold", "Do you feel cold more often than others, even in warm settings?"),
    q("Appearance_Changes", "Do you have brittle nails, pale skin, or hair loss?"),
    q("Alcohol_Use", "Do you consume alcohol regularly (more than 3-4 times per week)?"),
    q("Liver_History", "Have you had hepatitis or known liver issues in the past?"),
    q("Exercise_Low", "Do you exercise less than 3 times per week?"),
    q(
        "Family_History",
        "Do you have a family history of heart disease, diabetes, or thyroid issues?",
    ),
];

/// Look up a question by key
pub fn find(key: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.key == key)
}

/// All question keys in declared order
pub fn keys() -> impl Iterator<Item = &'static str> {
    QUESTIONS.iter().map(|q| q.key)
}
