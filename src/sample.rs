//! Built-in sample program, loaded with `--sample` or the `l` key

pub const SAMPLE_SOURCE: &str = r#"# Sample program
message = "Sample text" # assignment and string
# function definition
def add(num1, num2):
    # keyword and comparison
    if num1 > 0:
        return num1 + num2 # return statement
    else:
        return 0

# function call
result = add(10, 20.5)
# arithmetic
a=1
b=2
c=a*b
d=a/b
"#;

/// Label used in place of a file name
pub const SAMPLE_NAME: &str = "<sample>";
