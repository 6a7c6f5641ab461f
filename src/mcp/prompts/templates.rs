//! Static content for prompts.
//!
//! `{current}`, `{target}` and `{other}` are substituted by the generators.

/// Instructions for summarizing the current branch.
pub const BRANCH_SUMMARY: &str = "Please create a comprehensive summary of branch '{current}':

1. Check @branch://context for saved context
2. Check @branch://notes for saved notes
3. Use git diff to see what's changed from main
4. Summarize:
   - What this branch is for
   - Current status
   - Key changes made
   - Any blockers or TODOs
   - Next steps

Format as a clear, organized report.";

/// Instructions for preparing a branch switch.
pub const SWITCH_BRANCH: &str = "I'm about to switch from '{current}' to '{target}'.

Please help me:
1. Summarize current work on '{current}' (ask if I want to save context)
2. Show me the context for '{target}' if it exists
3. Show me the notes for '{target}' if they exist
4. Explain what '{target}' is working on
5. Ask if I'm ready to switch

Don't actually switch branches - just prepare me with context.";

/// Instructions for comparing two branches.
pub const BRANCH_COMPARE: &str = "Compare branch '{current}' with '{other}':

1. Use compare_branches tool to see file changes
2. Check if both branches have saved context
3. Explain:
   - What's different
   - Which branch is ahead
   - Potential merge conflicts
   - Recommendations

Provide a clear comparison report.";
