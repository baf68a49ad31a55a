//! Response schemas declared to Gemini (OpenAPI subset, upper-case types).

use serde_json::{json, Value};

pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "productName": {
                "type": "STRING",
                "description": "The extracted product name."
            },
            "productDetails": {
                "type": "STRING",
                "description": "The product's details and characteristics."
            },
            "targetAudience": {
                "type": "STRING",
                "description": "The suggested target audience."
            }
        },
        "required": ["productName", "productDetails", "targetAudience"],
        "propertyOrdering": ["productName", "productDetails", "targetAudience"]
    })
}

pub fn ad_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "The optimized product title, at most 150 characters."
            },
            "description": {
                "type": "STRING",
                "description": "The optimized product description, at most 5000 characters."
            },
            "category": {
                "type": "STRING",
                "description": "The suggested Google product category path."
            },
            "compliance": {
                "type": "OBJECT",
                "properties": {
                    "status": {
                        "type": "STRING",
                        "format": "enum",
                        "enum": ["approved", "review_needed"],
                        "description": "Compliance status: 'approved' or 'review_needed'."
                    },
                    "feedback": {
                        "type": "STRING",
                        "description": "Detailed explanation of the compliance review."
                    }
                },
                "required": ["status", "feedback"],
                "propertyOrdering": ["status", "feedback"]
            }
        },
        "required": ["title", "description", "category", "compliance"],
        "propertyOrdering": ["title", "description", "category", "compliance"]
    })
}
